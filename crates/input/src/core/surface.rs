use mcnpkit_utils::f;

/// Boundary condition marked on the surface number
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// Plain surface
    #[default]
    None,
    /// Specularly reflecting surface (`*` prefix)
    Reflecting,
    /// White boundary (`+` prefix)
    White,
}

/// Surface card data
///
/// Parameters are kept as the raw text of each numeric literal. Whether the
/// mnemonic is legal is a validation question, so a surface with an unknown
/// `kind` is still available for cross-referencing.
///
/// ```text
/// 1    px 0.0
/// *2 3 cz 10.0     $ reflecting, transformed by tr3
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Surface {
    /// Surface number
    pub id: u32,
    /// Surface mnemonic, e.g. `px`, `c/z`, `rpp` (empty if missing)
    pub kind: String,
    /// Raw parameter literals in card order
    pub parameters: Vec<String>,
    /// Transformation number, negative for periodic surfaces
    pub transform: Option<i32>,
    /// Boundary condition
    pub boundary: Boundary,
    /// Comment associated with the card
    pub comment: Option<String>,
}

impl Surface {
    /// Parameters joined back into card text
    ///
    /// ```rust
    /// # use mcnpkit_input::Surface;
    /// let surface = Surface {
    ///     id: 1,
    ///     kind: "s".to_string(),
    ///     parameters: vec!["0".into(), "0".into(), "1.5".into(), "10".into()],
    ///     ..Default::default()
    /// };
    /// assert_eq!(surface.parameters_str(), "0 0 1.5 10");
    /// ```
    pub fn parameters_str(&self) -> String {
        self.parameters.join(" ")
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!("Surface {}: {} {}", self.id, self.kind, self.parameters_str());
        if let Some(transform) = self.transform {
            s += &f!("  tr: {transform}");
        }
        write!(f, "{}", s.trim_end())
    }
}
