//! File and stream I/O around the core.
//!
//! Reads secrets, writes one file per share in the wire format, and reads share files back
//! into a [`ShareSet`]. Nothing here touches field arithmetic.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;
use crate::mpc::{MpcError, Share, ShareSet};

/// Placeholder replaced by the share index in output templates.
pub const INDEX_PLACEHOLDER: &str = "{i}";

/// Errors for share and secret I/O.
#[derive(Debug)]
pub enum IoError {
    /// Underlying read/write failure.
    Io { path: Option<PathBuf>, source: io::Error },
    /// File contents are not a valid share.
    Share { path: PathBuf, source: MpcError },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::Io { path: Some(path), source } => write!(f, "{}: {}", path.display(), source),
            IoError::Io { path: None, source } => write!(f, "standard stream: {}", source),
            IoError::Share { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::Io { source, .. } => Some(source),
            IoError::Share { source, .. } => Some(source),
        }
    }
}

fn at(path: &Path) -> impl FnOnce(io::Error) -> IoError + '_ {
    move |source| IoError::Io { path: Some(path.to_path_buf()), source }
}

fn stream(source: io::Error) -> IoError {
    IoError::Io { path: None, source }
}

/// Where the secret to split comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    Stdin,
    File(PathBuf),
    /// Command-line words, joined with single spaces.
    Inline(Vec<String>),
}

impl SecretSource {
    /// Resolves the `--input` flag and trailing arguments.
    ///
    /// No input flag: trailing arguments if any, stdin otherwise. The names `-`, `0`, `std`,
    /// `stdio` and `stdin` select stdin; anything else is a file path.
    pub fn from_args(input: Option<&str>, args: &[String]) -> Self {
        match input {
            None | Some("") if args.is_empty() => SecretSource::Stdin,
            None | Some("") => SecretSource::Inline(args.to_vec()),
            Some("-" | "0" | "std" | "stdio" | "stdin") => SecretSource::Stdin,
            Some(path) => SecretSource::File(PathBuf::from(path)),
        }
    }
}

/// Reads the whole secret.
pub fn read_secret(source: &SecretSource) -> Result<Zeroizing<Vec<u8>>, IoError> {
    let mut buf = Zeroizing::new(Vec::new());
    match source {
        SecretSource::Stdin => {
            io::stdin().read_to_end(&mut buf).map_err(stream)?;
        }
        SecretSource::File(path) => {
            fs::File::open(path)
                .and_then(|mut f| f.read_to_end(&mut buf))
                .map_err(at(path))?;
        }
        SecretSource::Inline(words) => {
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    buf.push(b' ');
                }
                buf.extend_from_slice(word.as_bytes());
            }
        }
    }
    Ok(buf)
}

/// Where a recovered secret goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `""`, `-`, `1`, `std`, `stdio` and `stdout` select stdout.
    pub fn from_arg(output: Option<&str>) -> Self {
        match output {
            None | Some("" | "-" | "1" | "std" | "stdio" | "stdout") => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(PathBuf::from(path)),
        }
    }
}

/// Writes `data` to the target, truncating an existing file.
pub fn write_output(target: &OutputTarget, data: &[u8]) -> Result<(), IoError> {
    match target {
        OutputTarget::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(data).and_then(|_| out.flush()).map_err(stream)
        }
        OutputTarget::File(path) => {
            create_private(path)
                .and_then(|mut f| f.write_all(data))
                .map_err(at(path))
        }
    }
}

/// On-disk representation of a share file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareEncoding {
    /// Raw wire format: index byte then value bytes.
    #[default]
    Binary,
    /// Wire format as a single line of hex.
    Hex,
}

/// Output path for share `index`.
///
/// If `template` contains `{i}` every occurrence is replaced with the decimal index;
/// otherwise the index is appended.
pub fn share_path(template: &str, index: u8) -> PathBuf {
    if template.contains(INDEX_PLACEHOLDER) {
        PathBuf::from(template.replace(INDEX_PLACEHOLDER, &index.to_string()))
    } else {
        PathBuf::from(format!("{}{}", template, index))
    }
}

/// Writes every share to its templated path. Returns the paths written.
pub fn write_shares(
    template: &str,
    shares: &ShareSet,
    encoding: ShareEncoding,
) -> Result<Vec<PathBuf>, IoError> {
    let mut written = Vec::with_capacity(shares.len());
    for share in shares {
        let path = share_path(template, share.identifier());
        let bytes = Zeroizing::new(match encoding {
            ShareEncoding::Binary => share.to_bytes(),
            ShareEncoding::Hex => {
                let mut line = share.to_hex().into_bytes();
                line.push(b'\n');
                line
            }
        });
        create_private(&path)
            .and_then(|mut f| f.write_all(&bytes))
            .map_err(at(&path))?;
        log::info!("wrote share {} to {}", share.identifier(), path.display());
        written.push(path);
    }
    Ok(written)
}

/// Reads one share file.
pub fn read_share(path: &Path, encoding: ShareEncoding) -> Result<Share, IoError> {
    let data = Zeroizing::new(fs::read(path).map_err(at(path))?);
    let parsed = match encoding {
        ShareEncoding::Binary => Share::from_bytes(&data),
        ShareEncoding::Hex => core::str::from_utf8(&data)
            .map_err(|_| MpcError::MalformedShare)
            .and_then(Share::from_hex),
    };
    parsed.map_err(|source| IoError::Share { path: path.to_path_buf(), source })
}

/// Reads share files into a set. Two files with the same index are an error.
pub fn read_shares<P: AsRef<Path>>(
    paths: &[P],
    encoding: ShareEncoding,
) -> Result<ShareSet, IoError> {
    let mut shares = ShareSet::new();
    for path in paths {
        let path = path.as_ref();
        let share = read_share(path, encoding)?;
        log::debug!("read share {} from {}", share.identifier(), path.display());
        shares
            .insert(share)
            .map_err(|source| IoError::Share { path: path.to_path_buf(), source })?;
    }
    Ok(shares)
}

/// Creates or truncates `path`, readable by the owner only on Unix.
fn create_private(path: &Path) -> io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf256::Field;
    use crate::mpc::{combine, split_tagged};
    use crate::mpc::testutil::MockEntropy;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("shamir-gf256-{}-{}", name, std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            TempDir(dir)
        }

        fn template(&self, pattern: &str) -> String {
            self.0.join(pattern).to_string_lossy().into_owned()
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_share_path_template() {
        assert_eq!(share_path("share-{i}.bin", 7), PathBuf::from("share-7.bin"));
        assert_eq!(share_path("{i}/{i}", 12), PathBuf::from("12/12"));
        assert_eq!(share_path("share.", 255), PathBuf::from("share.255"));
        assert_eq!(share_path("", 3), PathBuf::from("3"));
    }

    #[test]
    fn test_secret_source_resolution() {
        let words = vec!["correct".to_string(), "horse".to_string()];
        assert_eq!(SecretSource::from_args(None, &[]), SecretSource::Stdin);
        assert_eq!(SecretSource::from_args(Some(""), &words), SecretSource::Inline(words.clone()));
        assert_eq!(SecretSource::from_args(Some("stdin"), &words), SecretSource::Stdin);
        assert_eq!(SecretSource::from_args(Some("-"), &[]), SecretSource::Stdin);
        assert_eq!(
            SecretSource::from_args(Some("secret.txt"), &[]),
            SecretSource::File(PathBuf::from("secret.txt"))
        );

        let inline = read_secret(&SecretSource::Inline(words)).unwrap();
        assert_eq!(&inline[..], b"correct horse");
    }

    #[test]
    fn test_output_target_resolution() {
        assert_eq!(OutputTarget::from_arg(None), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_arg(Some("1")), OutputTarget::Stdout);
        assert_eq!(OutputTarget::from_arg(Some("stdout")), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_arg(Some("out.bin")),
            OutputTarget::File(PathBuf::from("out.bin"))
        );
    }

    #[test]
    fn test_write_and_read_shares_binary() {
        let tmp = TempDir::new("binary");
        let field = Field::default_aes();
        let mut rng = MockEntropy::new(0x10);
        let shares = split_tagged(&field, b"HELLO", 2, 3, &mut rng).unwrap();

        let paths = write_shares(&tmp.template("share-{i}.bin"), &shares, ShareEncoding::Binary).unwrap();
        assert_eq!(paths.len(), 3);

        let raw = fs::read(&paths[0]).unwrap();
        assert_eq!(raw[0], 1);
        assert_eq!(raw.len(), 1 + 8 + 5);

        let read_back = read_shares(&paths[1..], ShareEncoding::Binary).unwrap();
        assert_eq!(read_back, shares.subset(&[2, 3]));
        assert_eq!(crate::mpc::combine_tagged(&field, &read_back).unwrap(), b"HELLO");
    }

    #[test]
    fn test_write_and_read_shares_hex() {
        let tmp = TempDir::new("hex");
        let field = Field::default_aes();
        let mut rng = MockEntropy::new(0x10);
        let shares = crate::mpc::split(&field, &[0x42], 2, 3, &mut rng).unwrap();

        let paths = write_shares(&tmp.template("s"), &shares, ShareEncoding::Hex).unwrap();
        assert!(paths[0].to_string_lossy().ends_with("s1"));
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "0152\n");

        let read_back = read_shares(&paths, ShareEncoding::Hex).unwrap();
        assert_eq!(combine(&field, &read_back).unwrap(), [0x42]);
    }

    #[test]
    fn test_read_rejects_bad_files() {
        let tmp = TempDir::new("bad");
        let empty = tmp.0.join("empty");
        fs::write(&empty, b"").unwrap();
        assert!(matches!(
            read_share(&empty, ShareEncoding::Binary),
            Err(IoError::Share { source: MpcError::MalformedShare, .. })
        ));

        let one = tmp.0.join("one");
        fs::write(&one, [0x01, 0xAA]).unwrap();
        let dup = tmp.0.join("dup");
        fs::write(&dup, [0x01, 0xBB]).unwrap();
        assert!(matches!(
            read_shares(&[&one, &dup], ShareEncoding::Binary),
            Err(IoError::Share { source: MpcError::DuplicateShareIndex, .. })
        ));

        assert!(matches!(
            read_share(&tmp.0.join("missing"), ShareEncoding::Binary),
            Err(IoError::Io { path: Some(_), .. })
        ));
    }

    #[test]
    fn test_write_output_file() {
        let tmp = TempDir::new("output");
        let path = tmp.0.join("secret.out");
        let target = OutputTarget::File(path.clone());
        write_output(&target, b"longer contents").unwrap();
        write_output(&target, b"short").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"short");

        let read = read_secret(&SecretSource::File(path)).unwrap();
        assert_eq!(&read[..], b"short");
    }
}
