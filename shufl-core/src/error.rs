use std::{error, fmt, io};

use crate::item::ItemId;

#[derive(Debug)]
pub enum Error {
    StoreDisconnected,
    ItemNotFound(ItemId),
    InvalidName,
    InvalidPhoto(String),
    IoError(io::Error),
    JsonError(Box<dyn error::Error + Send>),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreDisconnected => write!(f, "Item store disconnected"),
            Self::ItemNotFound(id) => write!(f, "Item {} not found", id),
            Self::InvalidName => write!(f, "Item name must not be blank"),
            Self::InvalidPhoto(reason) => write!(f, "Invalid photo selection: {}", reason),
            Self::IoError(err) => err.fmt(f),
            Self::JsonError(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}
