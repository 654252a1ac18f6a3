/// Join block outputs in registry order with `delimiter` between entries.
///
/// No delimiter follows the last entry. An empty delimiter leaves entries
/// adjacent. Empty outputs still occupy their segment.
pub fn compose<S: AsRef<str>>(outputs: &[S], delimiter: &str) -> String {
    let mut line = String::new();
    for (i, output) in outputs.iter().enumerate() {
        if i > 0 {
            line.push_str(delimiter);
        }
        line.push_str(output.as_ref());
    }
    line
}
