mod document;
mod folder;
mod note;

pub use document::Document;
pub use folder::{Folder, DEFAULT_FOLDER_NAME};
pub use note::{Note, UNTITLED};

use chrono::Utc;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_RANDOM_CHARS: usize = 10;

/// Generate a new entity id.
///
/// The id is the current Unix time in milliseconds written in base 36,
/// followed by a random suffix taken from a v4 UUID. Ids are unique with
/// overwhelming probability within a process; they are not meant to be
/// unguessable.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u128;
    let random = Uuid::new_v4().as_u128();

    let suffix = to_base36(random);
    let mut id = to_base36(millis);
    id.push_str(&suffix[suffix.len().saturating_sub(ID_RANDOM_CHARS)..]);
    id
}

/// Read a JSON `null` as the field's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ID_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // Only ASCII bytes from ID_ALPHABET are pushed
    String::from_utf8(digits).unwrap_or_default()
}
