//! Field validators for Brazilian form data.
//!
//! Every predicate is pure. Date predicates take the reference day as an
//! argument so callers control the clock.

use super::formatters::parse_date_time;
use crate::domain::{Record, Value};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::collections::BTreeMap;

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Checks `local@domain.tld` shape: no whitespace, exactly one `@`, and a dot
/// inside the domain with text on both sides.
///
/// ```
/// use planboard::formatting::validate_email;
///
/// assert!(validate_email("ana@gov.br"));
/// assert!(!validate_email("ana@gov"));
/// ```
#[must_use]
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rfind('.')
        .is_some_and(|dot| dot > 0 && dot + 1 < domain.len())
}

fn digits(input: &str) -> Vec<u32> {
    input.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// A phone number has 10 or 11 digits once punctuation is removed.
#[must_use]
pub fn validate_phone(phone: &str) -> bool {
    (10..=11).contains(&digits(phone).len())
}

/// Validates a CPF by length and both check digits.
///
/// Sequences of a single repeated digit are rejected.
#[must_use]
pub fn validate_cpf(cpf: &str) -> bool {
    let d = digits(cpf);
    if d.len() != 11 || d.iter().all(|&x| x == d[0]) {
        return false;
    }

    let check = |len: usize| {
        let weight_start = u32::try_from(len).unwrap_or(0) + 1;
        let sum: u32 = d[..len]
            .iter()
            .zip((2..=weight_start).rev())
            .map(|(digit, weight)| digit * weight)
            .sum();
        let rest = (sum * 10) % 11;
        if rest == 10 { 0 } else { rest }
    };

    check(9) == d[9] && check(10) == d[10]
}

/// Validates a CNPJ by length and both check digits.
///
/// Sequences of a single repeated digit are rejected.
#[must_use]
pub fn validate_cnpj(cnpj: &str) -> bool {
    let d = digits(cnpj);
    if d.len() != 14 || d.iter().all(|&x| x == d[0]) {
        return false;
    }

    // Weights cycle 2..=9 from the rightmost digit leftwards.
    let check = |len: usize| {
        let sum: u32 = d[..len]
            .iter()
            .rev()
            .zip((2..=9).cycle())
            .map(|(digit, weight)| digit * weight)
            .sum();
        let rest = sum % 11;
        if rest < 2 { 0 } else { 11 - rest }
    };

    check(12) == d[12] && check(13) == d[13]
}

/// A value is present unless it is null, blank text or NaN.
#[must_use]
pub fn validate_required(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Text(text) => !text.trim().is_empty(),
        Value::Number(n) => !n.is_nan(),
        Value::Bool(_) | Value::List(_) | Value::Map(_) => true,
    }
}

#[must_use]
pub fn validate_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

#[must_use]
pub fn validate_max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

#[must_use]
pub fn validate_min_value(value: f64, min: f64) -> bool {
    value >= min
}

#[must_use]
pub fn validate_max_value(value: f64, max: f64) -> bool {
    value <= max
}

/// Inclusive range check.
#[must_use]
pub fn validate_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// True when both dates parse and `start` is not after `end`.
#[must_use]
pub fn validate_date_range(start: &str, end: &str) -> bool {
    match (parse_date_time(start), parse_date_time(end)) {
        (Some(start), Some(end)) => start <= end,
        _ => false,
    }
}

/// True when `date` is on or after the start of `today`.
#[must_use]
pub fn validate_future_date(date: &str, today: NaiveDate) -> bool {
    parse_date_time(date).is_some_and(|dt| dt >= today.and_time(NaiveTime::MIN))
}

/// True when `date` is on or before the end of `today`.
#[must_use]
pub fn validate_past_date(date: &str, today: NaiveDate) -> bool {
    let end_of_day: NaiveDateTime = today
        .succ_opt()
        .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));
    parse_date_time(date).is_some_and(|dt| dt < end_of_day)
}

/// True when `value` parses as an absolute URL.
#[must_use]
pub fn validate_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// Outcome of [`validate_password`], one message per failed rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordCheck {
    pub errors: Vec<String>,
}

impl PasswordCheck {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks password strength: length, both letter cases, a digit and a symbol.
#[must_use]
pub fn validate_password(password: &str) -> PasswordCheck {
    let mut errors = Vec::new();

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.push(format!(
            "Senha deve ter pelo menos {PASSWORD_MIN_LENGTH} caracteres"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Senha deve conter pelo menos uma letra maiúscula".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Senha deve conter pelo menos uma letra minúscula".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Senha deve conter pelo menos um número".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        errors.push("Senha deve conter pelo menos um caractere especial".to_string());
    }

    PasswordCheck { errors }
}

/// Per-field validation rules, usually attached to a column in the schema.
///
/// ```toml
/// rules = { required = true, cpf = true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FieldRules {
    pub required: bool,
    pub email: bool,
    pub phone: bool,
    pub cpf: bool,
    pub cnpj: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// Field errors collected by [`validate_record`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    /// Messages keyed by field, only for fields that failed.
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormValidation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Blank values skip every rule except `required`.
fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Text(text) => !text.is_empty(),
        Value::List(_) | Value::Map(_) => true,
    }
}

fn field_errors(value: &Value, rules: &FieldRules) -> Vec<String> {
    let mut errors = Vec::new();

    if rules.required && !validate_required(value) {
        errors.push("Campo obrigatório".to_string());
    }

    if !has_content(value) {
        return errors;
    }
    let text = value.to_text();

    if rules.email && !validate_email(&text) {
        errors.push("E-mail inválido".to_string());
    }
    if rules.phone && !validate_phone(&text) {
        errors.push("Telefone inválido".to_string());
    }
    if rules.cpf && !validate_cpf(&text) {
        errors.push("CPF inválido".to_string());
    }
    if rules.cnpj && !validate_cnpj(&text) {
        errors.push("CNPJ inválido".to_string());
    }
    if let Some(min) = rules.min_length.filter(|&min| !validate_min_length(&text, min)) {
        errors.push(format!("Deve ter pelo menos {min} caracteres"));
    }
    if let Some(max) = rules.max_length.filter(|&max| !validate_max_length(&text, max)) {
        errors.push(format!("Deve ter no máximo {max} caracteres"));
    }

    errors
}

/// Validates the fields of one record against per-field rules.
///
/// Fields absent from the record are validated as null.
#[must_use]
pub fn validate_record<R: Record + ?Sized>(
    record: &R,
    rules: &BTreeMap<String, FieldRules>,
) -> FormValidation {
    let errors = rules
        .iter()
        .filter_map(|(field, field_rules)| {
            let messages = field_errors(&record.value(field), field_rules);
            (!messages.is_empty()).then(|| (field.clone(), messages))
        })
        .collect();

    FormValidation { errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn emails() {
        assert!(validate_email("maria.silva@saude.gov.br"));
        assert!(!validate_email("maria silva@gov.br"));
        assert!(!validate_email("@gov.br"));
        assert!(!validate_email("maria@.br"));
        assert!(!validate_email("maria@gov."));
        assert!(!validate_email("a@b@c.com"));
    }

    #[test]
    fn documents() {
        assert!(validate_cpf("529.982.247-25"));
        assert!(!validate_cpf("529.982.247-24"));
        assert!(!validate_cpf("111.111.111-11"));
        assert!(!validate_cpf("5299822472"));
        assert!(validate_cnpj("11.222.333/0001-81"));
        assert!(!validate_cnpj("11.222.333/0001-80"));
        assert!(!validate_cnpj("00000000000000"));
    }

    #[test]
    fn phones_and_lengths() {
        assert!(validate_phone("(11) 98765-4321"));
        assert!(validate_phone("1134567890"));
        assert!(!validate_phone("98765-4321"));
        assert!(validate_min_length("ação", 4));
        assert!(!validate_max_length("ação!", 4));
        assert!(validate_range(5.0, 5.0, 10.0));
        assert!(!validate_range(10.5, 5.0, 10.0));
    }

    #[test]
    fn required_values() {
        assert!(!validate_required(&Value::Null));
        assert!(!validate_required(&Value::from("   ")));
        assert!(validate_required(&Value::Number(0.0)));
        assert!(validate_required(&Value::Bool(false)));
    }

    #[test]
    fn dates_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert!(validate_future_date("2024-06-10", today));
        assert!(!validate_future_date("2024-06-09T23:59:59", today));
        assert!(validate_past_date("2024-06-10T23:59:59", today));
        assert!(!validate_past_date("2024-06-11", today));
        assert!(validate_date_range("2024-01-01", "2024-01-01"));
        assert!(!validate_date_range("2024-02-01", "2024-01-01"));
        assert!(!validate_date_range("?", "2024-01-01"));
    }

    #[test]
    fn urls_and_passwords() {
        assert!(validate_url("https://planejamento.gov.br/paa"));
        assert!(!validate_url("planejamento"));
        assert!(validate_password("Senha@2024").is_valid());
        let weak = validate_password("abc");
        assert_eq!(weak.errors.len(), 4);
        assert_eq!(weak.errors[0], "Senha deve ter pelo menos 8 caracteres");
    }

    #[test]
    fn record_validation_collects_messages_per_field() {
        let rules = BTreeMap::from([
            (
                "nome".to_string(),
                FieldRules {
                    required: true,
                    min_length: Some(3),
                    ..FieldRules::default()
                },
            ),
            (
                "email".to_string(),
                FieldRules {
                    email: true,
                    ..FieldRules::default()
                },
            ),
            (
                "cpf".to_string(),
                FieldRules {
                    required: true,
                    cpf: true,
                    ..FieldRules::default()
                },
            ),
        ]);

        let ok = json!({"nome": "Ana", "email": "", "cpf": "52998224725"});
        assert!(validate_record(&ok, &rules).is_valid());

        let bad = json!({"nome": "Al", "email": "al@", "cpf": null});
        let result = validate_record(&bad, &rules);
        assert_eq!(result.errors["nome"], vec!["Deve ter pelo menos 3 caracteres"]);
        assert_eq!(result.errors["email"], vec!["E-mail inválido"]);
        assert_eq!(result.errors["cpf"], vec!["Campo obrigatório"]);
    }
}
