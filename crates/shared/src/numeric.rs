use evalexpr::{build_operator_tree, context_map, Value};

/// Ошибки разбора числового ввода
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    /// Пустая строка
    #[error("empty input")]
    Empty,
    /// Ошибка парсинга выражения
    #[error("parse error: {0}")]
    Parse(String),
    /// Ошибка вычисления выражения
    #[error("evaluation error: {0}")]
    Evaluation(String),
    /// Результат не является числом
    #[error("expected a number, got {0}")]
    InvalidType(String),
    /// Бесконечность или NaN
    #[error("value is not finite")]
    NonFinite,
}

/// Вычислить числовое поле: число или простое арифметическое выражение
/// (`2*PI`, `1.5 + 0.25`). Нечисловые и бесконечные результаты отклоняются.
pub fn evaluate_numeric(input: &str) -> Result<f64, NumericError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(NumericError::Empty);
    }

    // Быстрый путь для обычных чисел
    if let Ok(value) = input.parse::<f64>() {
        return finite(value);
    }

    let context = context_map! {
        "PI" => std::f64::consts::PI,
        "E" => std::f64::consts::E,
    }
    .map_err(|e| NumericError::Evaluation(e.to_string()))?;

    let tree = build_operator_tree(input).map_err(|e| NumericError::Parse(e.to_string()))?;
    let value = tree
        .eval_with_context(&context)
        .map_err(|e| NumericError::Evaluation(e.to_string()))?;

    match value {
        Value::Float(f) => finite(f),
        Value::Int(i) => finite(i as f64),
        other => Err(NumericError::InvalidType(format!("{:?}", other))),
    }
}

fn finite(value: f64) -> Result<f64, NumericError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericError::NonFinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(evaluate_numeric("1.5"), Ok(1.5));
        assert_eq!(evaluate_numeric("  -3 "), Ok(-3.0));
    }

    #[test]
    fn test_expressions() {
        assert_eq!(evaluate_numeric("1.5 + 0.25"), Ok(1.75));
        assert_eq!(evaluate_numeric("2 * 3"), Ok(6.0));
        let v = evaluate_numeric("PI / 2").unwrap();
        assert!((v - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let e = evaluate_numeric("E").unwrap();
        assert!((e - std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(evaluate_numeric("inf"), Err(NumericError::NonFinite));
        assert_eq!(evaluate_numeric("NaN"), Err(NumericError::NonFinite));
        assert_eq!(evaluate_numeric("1.0 / 0.0"), Err(NumericError::NonFinite));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(evaluate_numeric(""), Err(NumericError::Empty));
        assert!(evaluate_numeric("abc").is_err());
        assert!(evaluate_numeric("true").is_err());
        assert!(evaluate_numeric("1 +").is_err());
    }
}
