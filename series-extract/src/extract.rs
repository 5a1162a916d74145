//! Maps one bibliographic record to its series/universe JSON objects.
use json::JsonValue;
use marcxchange::{Field, Record};

/// Namespace prepended to the record control number (001$a) to form a
/// globally unique work identifier.
pub const WORK_ID_NAMESPACE: &str = "870970-basis";

/// Series note field; repeatable.
const SERIES_TAG: &str = "530";

/// Universe note field; record scoped, first occurrence wins.
const UNIVERSE_TAG: &str = "534";

/// Build the namespaced work identifier for a record.
///
/// A record lacking 001$a yields an identifier with an empty suffix
/// rather than an error.
///
/// # Examples
///
/// ```
/// use marcxchange::Record;
///
/// let mut record = Record::default();
/// let field = record.add_data_field("001").unwrap();
/// field.add_subfield("a", "51488465").unwrap();
///
/// assert_eq!(series_extract::work_id(&record), "870970-basis:51488465");
/// assert_eq!(series_extract::work_id(&Record::default()), "870970-basis:");
/// ```
pub fn work_id(record: &Record) -> String {
    let id = record.first_value("001", "a").unwrap_or("");
    format!("{WORK_ID_NAMESPACE}:{id}")
}

/// Treat the upstream parser's empty-string-for-absent convention as
/// absence.
fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Every non-empty occurrence of a subfield within one field, in
/// occurrence order.
fn nonempty_values<'a>(field: &'a Field, code: &str) -> Vec<&'a str> {
    field
        .get_values(code)
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect()
}

/// Produce the output objects for one record.
///
/// One object per 530 occurrence in document order, populated from
/// that occurrence's subfields only.  A record with no 530 yields
/// exactly one object carrying the work identifier and any universe
/// data.
pub fn extract(record: &Record) -> Vec<JsonValue> {
    let work_id = work_id(record);
    let universe = record.get_fields(UNIVERSE_TAG).into_iter().next();

    let series_fields = record.get_fields(SERIES_TAG);

    if series_fields.is_empty() {
        let mut obj = json::object! { workId: work_id.as_str() };
        append_universe(&mut obj, universe);
        return vec![obj];
    }

    series_fields
        .into_iter()
        .map(|field| series_object(&work_id, field, universe))
        .collect()
}

fn series_object(work_id: &str, field: &Field, universe: Option<&Field>) -> JsonValue {
    let mut obj = json::object! { workId: work_id };

    if let Some(title) = nonempty(field.first_value("i")) {
        obj["seriesTitle"] = title.into();
    }

    if let Some(description) = nonempty(field.first_value("b")) {
        obj["seriesDescription"] = description.into();
    }

    let alternatives = nonempty_values(field, "x");
    if !alternatives.is_empty() {
        obj["seriesAlternativeTitle"] = alternatives.into();
    }

    let numbers = nonempty_values(field, "d");
    if !numbers.is_empty() {
        obj["numberInSeries"] = numbers.into();
    }

    if let Some(number) = nonempty(field.first_value("c")) {
        obj["numberInUniverse"] = number.into();
    }

    // Presence-only flags: the subfield existing at all is the signal,
    // its content is irrelevant.  Emitted as true or not at all.
    if field.has_subfield("e") {
        obj["readFirst"] = true.into();
    }

    if field.has_subfield("g") {
        obj["canBeReadIndependently"] = true.into();
    }

    append_universe(&mut obj, universe);

    obj
}

/// Universe data is record level; the same values land in every object
/// derived from the record.
fn append_universe(obj: &mut JsonValue, universe: Option<&Field>) {
    let Some(field) = universe else {
        return;
    };

    if let Some(title) = nonempty(field.first_value("i")) {
        obj["universeTitle"] = title.into();
    }

    if let Some(description) = nonempty(field.first_value("b")) {
        obj["universeDescription"] = description.into();
    }

    if let Some(alternative) = nonempty(field.first_value("x")) {
        obj["universeAlternativeTitle"] = alternative.into();
    }
}
