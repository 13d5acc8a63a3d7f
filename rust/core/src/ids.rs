// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic record identifiers
//!
//! Ids are UUID v5 values derived from the record kind, its index in the
//! result list and its coordinates, so analyzing the same drawing twice
//! yields identical output.

use uuid::Uuid;

const NAMESPACE: Uuid = Uuid::from_u128(0x6d72_6177_7363_616e_8f3a_41c2_9b0e_5d17);

/// Build a stable id for the `index`-th record of `kind` located at `coords`
pub fn stable_id(kind: &str, index: usize, coords: &[f64]) -> String {
    let mut name = format!("{kind}:{index}");
    for c in coords {
        name.push(':');
        name.push_str(&c.to_string());
    }
    Uuid::new_v5(&NAMESPACE, name.as_bytes()).to_string()
}
