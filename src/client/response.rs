use std::string::FromUtf8Error;

use bytes::Bytes;
use eyre::Report;

/// Body of a profile page that was served with status 200.
#[derive(Clone, Debug)]
pub struct ProfilePage(String);

impl ProfilePage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<Bytes> for ProfilePage {
    type Error = Report;

    fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
        String::from_utf8(bytes.into())
            .map(Self)
            .map_err(FromUtf8Error::into_bytes)
            .map_err(|bytes| eyre!("Invalid UTF-8 response: {:?}", String::from_utf8_lossy(&bytes)))
    }
}

impl From<&str> for ProfilePage {
    #[inline]
    fn from(body: &str) -> Self {
        Self(body.to_owned())
    }
}
