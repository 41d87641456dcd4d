/// Extends string types with useful functions
pub trait StringExt {
    /// Replace every occurrence of any character in `targets` with `with`
    ///
    /// ```rust
    /// # use voxmerge_utils::StringExt;
    /// assert_eq!("a b:c".replace_any(&[' ', ':'], '_'), "a_b_c".to_string());
    /// assert_eq!("".replace_any(&[' '], '_'), "".to_string());
    /// ```
    fn replace_any(&self, targets: &[char], with: char) -> String;
}

impl<T: AsRef<str>> StringExt for T {
    fn replace_any(&self, targets: &[char], with: char) -> String {
        self.as_ref()
            .chars()
            .map(|c| if targets.contains(&c) { with } else { c })
            .collect()
    }
}
