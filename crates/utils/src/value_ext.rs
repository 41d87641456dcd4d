use crate::f;

/// Fixed width scientific notation for numbers
pub trait ValueExt {
    /// Scientific notation with a signed, zero padded exponent
    ///
    /// `{:e}` prints `1e0` and `1.5e-7`, which do not line up in columns.
    /// This always gives `precision` decimals and an exponent of at least
    /// `exp_pad` digits with an explicit sign.
    ///
    /// ```rust
    /// # use voxmerge_utils::ValueExt;
    /// assert_eq!((-1.0).sci(5, 2), "-1.00000e+00");
    /// assert_eq!(0.0125_f32.sci(3, 2), "1.250e-02");
    /// assert_eq!(6.02e23.sci(1, 3), "6.0e+023");
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let text = f!("{self:.precision$e}");
        match text.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                f!("{mantissa}e{sign}{digits:0>exp_pad$}")
            }
            // NaN and infinities have no exponent
            None => text,
        }
    }
}
