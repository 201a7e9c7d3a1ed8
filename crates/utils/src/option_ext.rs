use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Display the contained value, or "none"
    ///
    /// ```rust
    /// # use mcnpkit_utils::OptionExt;
    /// let transform: Option<i32> = Some(2);
    /// assert_eq!(transform.display(), "2");
    ///
    /// let transform: Option<i32> = None;
    /// assert_eq!(transform.display(), "none");
    /// ```
    fn display(&self) -> String;

    /// Display the contained value, or a caller-provided fallback
    ///
    /// Useful for rendering optional codes where the consumer expects a
    /// specific placeholder.
    ///
    /// ```rust
    /// # use mcnpkit_utils::OptionExt;
    /// let code: Option<&str> = None;
    /// assert_eq!(code.display_or("N/A"), "N/A");
    /// assert_eq!(Some("CELL_NO_SURFACES").display_or("N/A"), "CELL_NO_SURFACES");
    /// ```
    fn display_or(&self, fallback: &str) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        self.display_or("none")
    }

    fn display_or(&self, fallback: &str) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => fallback.to_string(),
        }
    }
}
