use crate::error::{InductError, Result};
use crate::model::User;

/// Resolve user-supplied input against a set of known ids.
///
/// Exact match wins; otherwise a unique prefix match (ids are uuids, so a few
/// leading characters are normally enough). Ambiguous prefixes report the
/// sorted candidate list.
pub fn resolve_id<'a, I>(input: &str, candidates: I) -> Result<String>
where
    I: Iterator<Item = &'a str>,
{
    let raw = input.trim();
    if raw.is_empty() {
        return Err(InductError::IdNotFound(input.to_string()));
    }

    let mut matches: Vec<&str> = Vec::new();
    for id in candidates {
        if id == raw {
            return Ok(id.to_string());
        }
        if id.starts_with(raw) {
            matches.push(id);
        }
    }
    matches.sort();
    matches.dedup();

    match matches.len() {
        0 => Err(InductError::IdNotFound(raw.to_string())),
        1 => Ok(matches[0].to_string()),
        _ => Err(InductError::IdAmbiguous(raw.to_string(), matches.join(", "))),
    }
}

/// Resolve a catalog user by id, unique id prefix, or exact (case-insensitive)
/// name.
pub fn resolve_user<'a>(input: &str, users: &'a [User]) -> Result<&'a User> {
    let raw = input.trim();

    if let Some(user) = users
        .iter()
        .find(|u| u.name.eq_ignore_ascii_case(raw))
    {
        return Ok(user);
    }

    match resolve_id(raw, users.iter().map(|u| u.id.as_str())) {
        Ok(id) => Ok(users.iter().find(|u| u.id == id).expect("resolved id exists")),
        Err(InductError::IdNotFound(_)) => Err(InductError::UserNotFound(raw.to_string())),
        Err(e) => Err(e),
    }
}
