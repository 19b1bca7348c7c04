/// Application-level constants
pub const APP_NAME: &str = "Tumorline";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
/// Keeps engine internals at info; everything else at warn.
pub fn default_log_filter() -> String {
    format!("warn,{}=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_tumorline() {
        assert_eq!(APP_NAME, "Tumorline");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn default_filter_scopes_crate_to_info() {
        let filter = default_log_filter();
        assert!(filter.starts_with("warn,"));
        assert!(filter.contains("tumorline=info"));
    }
}
