use marcxchange::Record;
use series_extract::extract;

fn parse(xml: &str) -> Record {
    Record::from_xml(xml).next().unwrap().unwrap()
}

const NO_SERIES_XML: &str = r#"<record xmlns="info:lc/xmlns/marcxchange-v1" format="danMARC2" type="Bibliographic">
  <datafield tag="001" ind1="0" ind2="0">
    <subfield code="a">12345678</subfield>
    <subfield code="b">870970</subfield>
  </datafield>
  <datafield tag="245" ind1="0" ind2="0">
    <subfield code="a">Uden serie</subfield>
  </datafield>
</record>"#;

const ONE_SERIES_XML: &str = r#"<record xmlns="info:lc/xmlns/marcxchange-v1" format="danMARC2" type="Bibliographic">
  <datafield tag="001" ind1="0" ind2="0">
    <subfield code="a">12345678</subfield>
  </datafield>
  <datafield tag="530" ind1="0" ind2="0">
    <subfield code="i">The Series</subfield>
    <subfield code="d">1</subfield>
    <subfield code="d">2</subfield>
  </datafield>
  <datafield tag="534" ind1="0" ind2="0">
    <subfield code="i">The Universe</subfield>
  </datafield>
</record>"#;

const TWO_SERIES_XML: &str = r#"<record xmlns="info:lc/xmlns/marcxchange-v1" format="danMARC2" type="Bibliographic">
  <datafield tag="001" ind1="0" ind2="0">
    <subfield code="a">87654321</subfield>
  </datafield>
  <datafield tag="530" ind1="0" ind2="0">
    <subfield code="i">A</subfield>
    <subfield code="d">4</subfield>
  </datafield>
  <datafield tag="530" ind1="0" ind2="0">
    <subfield code="i">B</subfield>
  </datafield>
</record>"#;

const EVERYTHING_XML: &str = r#"<record xmlns="info:lc/xmlns/marcxchange-v1" format="danMARC2" type="Bibliographic">
  <datafield tag="001" ind1="0" ind2="0">
    <subfield code="a">55555555</subfield>
  </datafield>
  <datafield tag="530" ind1="0" ind2="0">
    <subfield code="i">Skammer-serien</subfield>
    <subfield code="b">Fire fortællinger om skammeren</subfield>
    <subfield code="x">Skammerens datter-serien</subfield>
    <subfield code="x">Dina-bøgerne</subfield>
    <subfield code="d">1</subfield>
    <subfield code="c">3</subfield>
    <subfield code="e"></subfield>
    <subfield code="g"></subfield>
  </datafield>
  <datafield tag="534" ind1="0" ind2="0">
    <subfield code="i">Katriona-universet</subfield>
    <subfield code="b">Om skammere og drager</subfield>
    <subfield code="x">Skammerverdenen</subfield>
  </datafield>
</record>"#;

#[test]
fn record_without_series_yields_one_object() {
    let objects = extract(&parse(NO_SERIES_XML));

    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].dump(), r#"{"workId":"870970-basis:12345678"}"#);
}

#[test]
fn single_series_with_universe() {
    let objects = extract(&parse(ONE_SERIES_XML));

    assert_eq!(objects.len(), 1);
    assert_eq!(
        objects[0].dump(),
        r#"{"workId":"870970-basis:12345678","seriesTitle":"The Series","numberInSeries":["1","2"],"universeTitle":"The Universe"}"#
    );
}

#[test]
fn repeated_series_fan_out_in_document_order() {
    let objects = extract(&parse(TWO_SERIES_XML));

    assert_eq!(objects.len(), 2);
    assert_eq!(
        objects[0].dump(),
        r#"{"workId":"870970-basis:87654321","seriesTitle":"A","numberInSeries":["4"]}"#
    );
    // The second group carries none of its sibling's subfields.
    assert_eq!(
        objects[1].dump(),
        r#"{"workId":"870970-basis:87654321","seriesTitle":"B"}"#
    );
}

#[test]
fn full_field_mapping() {
    let objects = extract(&parse(EVERYTHING_XML));

    assert_eq!(objects.len(), 1);
    let obj = &objects[0];

    assert_eq!(obj["workId"], "870970-basis:55555555");
    assert_eq!(obj["seriesTitle"], "Skammer-serien");
    assert_eq!(obj["seriesDescription"], "Fire fortællinger om skammeren");
    assert_eq!(obj["seriesAlternativeTitle"].len(), 2);
    assert_eq!(obj["seriesAlternativeTitle"][0], "Skammerens datter-serien");
    assert_eq!(obj["seriesAlternativeTitle"][1], "Dina-bøgerne");
    assert_eq!(obj["numberInSeries"][0], "1");
    assert_eq!(obj["numberInUniverse"], "3");
    assert_eq!(obj["readFirst"], true);
    assert_eq!(obj["canBeReadIndependently"], true);
    assert_eq!(obj["universeTitle"], "Katriona-universet");
    assert_eq!(obj["universeDescription"], "Om skammere og drager");
    assert_eq!(obj["universeAlternativeTitle"], "Skammerverdenen");
}

#[test]
fn universe_is_copied_into_every_series_object() {
    let xml = r#"<record xmlns="info:lc/xmlns/marcxchange-v1" format="danMARC2" type="Bibliographic">
  <datafield tag="001" ind1="0" ind2="0"><subfield code="a">1</subfield></datafield>
  <datafield tag="530" ind1="0" ind2="0"><subfield code="i">A</subfield></datafield>
  <datafield tag="530" ind1="0" ind2="0"><subfield code="i">B</subfield></datafield>
  <datafield tag="534" ind1="0" ind2="0"><subfield code="i">U</subfield></datafield>
</record>"#;

    let objects = extract(&parse(xml));

    assert_eq!(objects.len(), 2);
    for obj in &objects {
        assert_eq!(obj["universeTitle"], "U");
    }
}

#[test]
fn flags_are_never_false() {
    let objects = extract(&parse(ONE_SERIES_XML));

    let obj = &objects[0];
    assert!(!obj.has_key("readFirst"));
    assert!(!obj.has_key("canBeReadIndependently"));
}
