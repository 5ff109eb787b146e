//! Error kinds shared by every layer above the block device.

use std::fmt;
use std::io;

/// Everything that can go wrong while operating on the filesystem.
#[derive(Debug)]
pub enum Error {
    /// The underlying block device failed.
    Io(io::Error),
    /// Some non-final path component is missing, or the final component is
    /// missing when the operation requires it to exist.
    PathNotFound,
    /// An interior path component is not a directory.
    NotADirectory,
    /// The destination of `mkdir`/`link` is already taken.
    AlreadyExists,
    /// The target of an operation requiring a file is not one.
    NotAFile,
    /// `rmdir` was called on a directory holding more than `.` and `..`.
    NotEmpty,
    /// `rmdir` was called on `.`, `..`, or `/`.
    ReservedName,
    /// The block bitmap has no free bit.
    NoBlocks,
    /// The inode bitmap has no free bit.
    NoInodes,
    /// A directory's single data block has no empty entry slot left.
    DirectoryFull,
    /// A path component is longer than `FILE_NAME_SIZE - 1` bytes.
    NameTooLong,
    /// A path string is longer than `MAX_PATH_LENGTH` bytes.
    PathTooLong,
    /// `open` was called with a mode string other than `"r"`, `"w"`, `"a"`.
    BadMode,
    /// A file handle was used in a way its open mode does not allow.
    InvalidHandle,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::PathNotFound => write!(f, "no such file or directory"),
            Error::NotADirectory => write!(f, "not a directory"),
            Error::AlreadyExists => write!(f, "file already exists"),
            Error::NotAFile => write!(f, "not a file"),
            Error::NotEmpty => write!(f, "directory not empty"),
            Error::ReservedName => write!(f, "\".\", \"..\" and \"/\" may not be removed"),
            Error::NoBlocks => write!(f, "no free blocks"),
            Error::NoInodes => write!(f, "no free inodes"),
            Error::DirectoryFull => write!(f, "directory is full"),
            Error::NameTooLong => write!(f, "name too long"),
            Error::PathTooLong => write!(f, "path too long"),
            Error::BadMode => write!(f, "invalid open mode"),
            Error::InvalidHandle => write!(f, "file handle does not support this operation"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Shorthand result type used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;
