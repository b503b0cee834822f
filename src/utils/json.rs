use std::fs;
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::DatasetError;

pub fn load_json<T, P>(path: P) -> Result<T, DatasetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save_json<T, P>(data: &T, path: P) -> Result<(), DatasetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let serialized = serde_json::to_string_pretty(data)?;
    fs::write(path, serialized)?;
    Ok(())
}
