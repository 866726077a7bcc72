use uuid::Uuid;

use crate::errors::RequestError;

/// Largest batch [`generate_uuids`] will produce.
pub const MAX_UUID_BATCH: i64 = 1024;

/// Generates `count` random v4 UUIDs.
///
/// # Errors
///
/// Returns [`RequestError::BadRequest`] if `count` is outside `1..=1024`.
pub fn generate_uuids(count: i64) -> Result<Vec<Uuid>, RequestError> {
    if !(1..=MAX_UUID_BATCH).contains(&count) {
        return Err(RequestError::BadRequest(format!(
            "The count parameter cannot be below 1 or greater than {}.",
            MAX_UUID_BATCH
        )));
    }

    Ok((0..count).map(|_| Uuid::new_v4()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_single() {
        assert_eq!(generate_uuids(1).unwrap().len(), 1);
    }

    #[test]
    fn test_generate_batch_is_unique() {
        let ids = generate_uuids(MAX_UUID_BATCH).unwrap();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_generate_out_of_range() {
        for count in [0, -1, MAX_UUID_BATCH + 1] {
            let err = generate_uuids(count).unwrap_err();
            assert_eq!(
                err.to_string(),
                "The count parameter cannot be below 1 or greater than 1024."
            );
        }
    }
}
