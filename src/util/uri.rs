use crate::model;

const SCHEME: &str = "onedrive://";

pub fn parse_user_from_uri(drive_uri: &str) -> Result<model::drive::User, model::drive::BatchError> {
    let rest = match drive_uri.strip_prefix(SCHEME) {
        Some(rest) => rest,
        None => {
            return Err(model::drive::BatchError::InvalidInput(format!(
                "failed to parse drive uri: {}",
                drive_uri
            )));
        }
    };

    if rest == "me" {
        return Ok(model::drive::User::Me);
    }

    match rest.strip_prefix("users/") {
        Some(principal) if !principal.is_empty() => {
            Ok(model::drive::User::Principal(principal.to_string()))
        }
        _ => Err(model::drive::BatchError::InvalidInput(format!(
            "failed to parse drive uri: {}",
            drive_uri
        ))),
    }
}
