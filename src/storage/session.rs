//! Calculator state carried across runs.

use crate::calculator::{AngleMode, Calculator, coerce, number_to_string};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The transient part of the calculator. Angle mode is stored separately and
/// alt-mode is never saved.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub buffer: String,
    /// Stored as numeric text so `NaN` and infinities survive JSON.
    #[serde(serialize_with = "serialize_values", deserialize_with = "deserialize_values")]
    pub stack: Vec<f64>,
    #[serde(default)]
    pub replace_on_entry: bool,
    #[serde(default)]
    pub push_on_entry: bool,
}

impl Session {
    pub fn capture(calculator: &Calculator) -> Self {
        Self {
            buffer: calculator.buffer().to_string(),
            stack: calculator.stack().to_vec(),
            replace_on_entry: calculator.replace_on_entry(),
            push_on_entry: calculator.push_on_entry(),
        }
    }

    pub fn restore(self, angle_mode: AngleMode) -> Calculator {
        Calculator::restore(
            self.buffer,
            self.stack,
            self.replace_on_entry,
            self.push_on_entry,
            angle_mode,
        )
    }
}

fn serialize_values<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|v| number_to_string(*v)))
}

fn deserialize_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let texts = Vec::<String>::deserialize(deserializer)?;
    Ok(texts.iter().map(|text| coerce(text)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operator;
    use crate::storage::{SESSION_KEY, Store};

    #[test]
    fn test_capture_and_restore() {
        let mut calc = Calculator::default();
        calc.type_key('2');
        calc.push();
        calc.type_key('0');
        calc.apply_operator(Operator::Reciprocal);

        let restored = Session::capture(&calc).restore(AngleMode::Degrees);
        assert_eq!(restored.buffer(), "Infinity");
        assert_eq!(restored.stack(), &[2.0]);
        assert!(restored.push_on_entry());
        assert!(!restored.replace_on_entry());
        assert!(restored.angle_mode().is_degrees());
    }

    #[test]
    fn test_special_values_survive_json() {
        let session = Session {
            buffer: "1.".to_string(),
            stack: vec![f64::NAN, f64::NEG_INFINITY, 0.25],
            replace_on_entry: true,
            push_on_entry: false,
        };

        let mut store = Store::in_memory();
        store.set(SESSION_KEY, &session);
        let loaded: Option<Session> = store.get(SESSION_KEY, None);
        let loaded = loaded.unwrap();

        assert_eq!(loaded.buffer, "1.");
        assert!(loaded.stack[0].is_nan());
        assert_eq!(loaded.stack[1], f64::NEG_INFINITY);
        assert_eq!(loaded.stack[2], 0.25);
        assert!(loaded.replace_on_entry);
    }

    #[test]
    fn test_json_shape() {
        let session = Session {
            buffer: "3".to_string(),
            stack: vec![1.5],
            replace_on_entry: false,
            push_on_entry: true,
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "buffer": "3",
                "stack": ["1.5"],
                "replace_on_entry": false,
                "push_on_entry": true,
            })
        );
    }
}
