//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Error, Formatter};

/// Output of the external encryption oracle for one item
///
/// The bytes are opaque: equality and ordering are plain lexicographic byte
/// comparison, nothing else is interpreted.
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Debug, Default, Serialize, Deserialize)]
pub struct EncryptedElement {
    pub buffer: Vec<u8>,
}

impl EncryptedElement {
    pub fn from_slice(v: &[u8]) -> EncryptedElement {
        EncryptedElement { buffer: v.to_vec() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl From<Vec<u8>> for EncryptedElement {
    fn from(buffer: Vec<u8>) -> Self {
        EncryptedElement { buffer }
    }
}

impl From<&[u8]> for EncryptedElement {
    fn from(v: &[u8]) -> Self {
        EncryptedElement::from_slice(v)
    }
}

impl From<&str> for EncryptedElement {
    fn from(v: &str) -> Self {
        EncryptedElement::from_slice(v.as_bytes())
    }
}

impl AsRef<[u8]> for EncryptedElement {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl Display for EncryptedElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", hex::encode_upper(&self.buffer))
    }
}
