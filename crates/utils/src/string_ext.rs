/// Extends string types with useful functions for card text
pub trait StringExt {
    /// Collapse every run of whitespace into a single space
    ///
    /// Leading and trailing whitespace is removed entirely.
    ///
    /// ```rust
    /// # use mcnpkit_utils::StringExt;
    /// assert_eq!("  concrete   density \t -2.35 ".squeeze(), "concrete density -2.35");
    /// ```
    fn squeeze(&self) -> String;

    /// Trim decorative separator runs (`--`, `==`, `||`) from both ends
    ///
    /// Comment banners are often drawn with these characters, which carry no
    /// information worth keeping.
    ///
    /// ```rust
    /// # use mcnpkit_utils::StringExt;
    /// assert_eq!("---- shielding ----".trim_separators(), "shielding");
    /// assert_eq!("|| == source == ||".trim_separators(), "source");
    /// ```
    fn trim_separators(&self) -> &str;

    /// Number of leading space characters
    ///
    /// Only literal spaces count, tabs are not expanded.
    ///
    /// ```rust
    /// # use mcnpkit_utils::StringExt;
    /// assert_eq!("     1 -2".leading_spaces(), 5);
    /// assert_eq!("1 -2".leading_spaces(), 0);
    /// ```
    fn leading_spaces(&self) -> usize;

    /// Remove whitespace either side of every `=`
    ///
    /// ```rust
    /// # use mcnpkit_utils::StringExt;
    /// assert_eq!("m1 nlib = .80c 1001 2".tighten_assignments(), "m1 nlib=.80c 1001 2");
    /// ```
    fn tighten_assignments(&self) -> String;
}

impl<T: AsRef<str>> StringExt for T {
    fn squeeze(&self) -> String {
        self.as_ref().split_whitespace().collect::<Vec<&str>>().join(" ")
    }

    fn trim_separators(&self) -> &str {
        self.as_ref()
            .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '=' | '|'))
    }

    fn leading_spaces(&self) -> usize {
        let s = self.as_ref();
        s.len() - s.trim_start_matches(' ').len()
    }

    fn tighten_assignments(&self) -> String {
        self.as_ref()
            .split('=')
            .map(str::trim)
            .collect::<Vec<&str>>()
            .join("=")
    }
}
