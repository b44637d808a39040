use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Balance {
        user_id: &'static str,
        balance: i64,
    }

    #[test]
    fn raw_is_single_line() {
        let value = Balance { user_id: "usr-1", balance: 180 };
        let rendered = render(&value, OutputFormat::Raw).expect("render");
        assert_eq!(rendered, r#"{"user_id":"usr-1","balance":180}"#);
    }

    #[test]
    fn json_is_pretty() {
        let value = Balance { user_id: "usr-1", balance: 180 };
        let rendered = render(&value, OutputFormat::Json).expect("render");
        assert!(rendered.contains('\n'));
        assert!(rendered.contains(r#""balance": 180"#));
    }
}
