use crate::parsers::parse_f64;

/// Transformation card data (`tr<n>` or `*tr<n>`)
///
/// The parameter text is kept as written. The `*` form gives rotation
/// entries in degrees rather than cosines, which is recorded but does not
/// change how the parameters are stored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transformation {
    /// Transformation number
    pub id: u32,
    /// Raw parameter text after the card name
    pub parameters: String,
    /// True for the `*tr` angle form
    pub is_angle_form: bool,
    /// Comment associated with the card
    pub comment: Option<String>,
}

impl Transformation {
    /// Numeric parameters, or `None` if any literal is not a number
    ///
    /// ```rust
    /// # use mcnpkit_input::Transformation;
    /// let tr = Transformation {
    ///     id: 1,
    ///     parameters: "0 0 1.5-1".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(tr.values(), Some(vec![0.0, 0.0, 0.15]));
    /// ```
    pub fn values(&self) -> Option<Vec<f64>> {
        self.parameters.split_whitespace().map(parse_f64).collect()
    }

    /// Displacement vector, the first three parameters
    pub fn displacement(&self) -> Option<[f64; 3]> {
        match self.values()?.as_slice() {
            [x, y, z, ..] => Some([*x, *y, *z]),
            _ => None,
        }
    }
}

impl std::fmt::Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let form = if self.is_angle_form { " (angles)" } else { "" };
        write!(f, "Transformation {}{}: {}", self.id, form, self.parameters)
    }
}
