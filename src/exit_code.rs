use crate::error::ReqoptsError;

pub fn exit_code_for_error(err: &ReqoptsError) -> i32 {
    match err {
        ReqoptsError::InvalidUrl(_) => 3,
        ReqoptsError::Config(_) | ReqoptsError::Conflict(_) | ReqoptsError::Type(_) => 2,
        ReqoptsError::Encoding(_) | ReqoptsError::Json(_) => 26,
        ReqoptsError::Io(_) => 23,
        ReqoptsError::Http(err) => http_exit_code(err),
        ReqoptsError::Transport(_) => 43,
    }
}

fn http_exit_code(err: &reqwest::Error) -> i32 {
    if err.is_timeout() {
        return 28;
    }
    if err.is_connect() {
        return 7;
    }
    if err.is_request() {
        return 2;
    }
    43
}

#[cfg(test)]
mod tests {
    use super::exit_code_for_error;
    use crate::error::ReqoptsError;

    #[test]
    fn exit_code_maps_invalid_url() {
        let err = ReqoptsError::InvalidUrl("bad".to_string());
        assert_eq!(exit_code_for_error(&err), 3);
    }

    #[test]
    fn exit_code_maps_option_errors_to_usage() {
        let conflict = ReqoptsError::Conflict("form_params and multipart".to_string());
        assert_eq!(exit_code_for_error(&conflict), 2);

        let type_err = ReqoptsError::Type("query".to_string());
        assert_eq!(exit_code_for_error(&type_err), 2);

        let encoding = ReqoptsError::Encoding("json".to_string());
        assert_eq!(exit_code_for_error(&encoding), 26);
    }
}
