use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use hex::encode as hex_encode;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Result of patching a `KEY=value` line into an env file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvPatch {
    Replaced,
    Appended,
}

/// `bytes` random bytes rendered as lowercase hex.
pub fn generate_token(bytes: usize) -> Result<String> {
    if bytes == 0 {
        return Err(Error::InvalidInput {
            message: "token length must be at least one byte".to_string(),
        });
    }
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    Ok(hex_encode(buf))
}

/// What gets written to the token file: the token itself or its SHA-256 digest.
pub fn stored_representation(token: &str, hashed: bool) -> String {
    if hashed {
        hex_encode(Sha256::digest(token.as_bytes()))
    } else {
        token.to_string()
    }
}

/// Set `key` to `value`, replacing the first `KEY=` line in place or appending one.
///
/// Every other byte is preserved, including `\r\n` line endings.
pub fn set_env_var(contents: &str, key: &str, value: &str) -> (String, EnvPatch) {
    let mut patched = String::with_capacity(contents.len() + key.len() + value.len() + 2);
    let mut replaced = false;

    for line in contents.split_inclusive('\n') {
        let body = line.trim_end_matches(['\r', '\n']);
        if !replaced && defines_key(body, key) {
            let indent = &body[..body.len() - body.trim_start().len()];
            let ending = &line[body.len()..];
            patched.push_str(&format!("{indent}{key}={value}{ending}"));
            replaced = true;
        } else {
            patched.push_str(line);
        }
    }

    if replaced {
        return (patched, EnvPatch::Replaced);
    }

    let newline = if contents.contains("\r\n") { "\r\n" } else { "\n" };
    if !patched.is_empty() && !patched.ends_with('\n') {
        patched.push_str(newline);
    }
    patched.push_str(&format!("{key}={value}{newline}"));
    (patched, EnvPatch::Appended)
}

fn defines_key(line: &str, key: &str) -> bool {
    line.trim_start()
        .strip_prefix(key)
        .is_some_and(|rest| rest.starts_with('='))
}

/// Apply `set_env_var` to the file at `path`, creating it when missing.
pub fn patch_env_file(path: &Path, key: &str, value: &str) -> Result<EnvPatch> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(Error::ReadFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let (patched, patch) = set_env_var(&contents, key, value);
    write_with_parents(path, &patched)?;
    Ok(patch)
}

pub fn write_with_parents(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
