//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

//! Setup message the server sends to the client.
//!
//! Only the raw data structure section is carried here. A message without it
//! is incomplete and refused by [`crate::raw::EncryptedSet::from_envelope`].

use serde::{Deserialize, Serialize};

use crate::element::EncryptedElement;
use crate::raw::PsiError;

/// Sorted encrypted server elements
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSetup {
    pub encrypted_elements: Vec<EncryptedElement>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSetup {
    pub raw: Option<RawSetup>,
}

impl ServerSetup {
    /// True when every required section is present
    pub fn is_initialized(&self) -> bool {
        self.raw.is_some()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PsiError> {
        bincode::serialize(self).map_err(|err| {
            error!("Cannot encode ServerSetup {}", err);
            PsiError::InvalidInput(format!("cannot encode `ServerSetup`: {}", err))
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<ServerSetup, PsiError> {
        bincode::deserialize::<ServerSetup>(bytes).map_err(|err| {
            error!("Cannot decode ServerSetup {}", err);
            PsiError::InvalidInput(format!("cannot decode `ServerSetup`: {}", err))
        })
    }
}
