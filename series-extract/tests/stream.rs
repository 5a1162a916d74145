use marcxchange::Record;
use series_extract::SeriesRegistry;
use series_extract::SeriesStream;

const COLLECTION_XML: &str = r#"<collection xmlns="info:lc/xmlns/marcxchange-v1">
  <record format="danMARC2" type="Bibliographic">
    <datafield tag="001" ind1="0" ind2="0"><subfield code="a">1</subfield></datafield>
    <datafield tag="530" ind1="0" ind2="0">
      <subfield code="i">Skammer-serien</subfield>
      <subfield code="d">1</subfield>
      <subfield code="e"></subfield>
    </datafield>
    <datafield tag="534" ind1="0" ind2="0"><subfield code="i">Katriona-universet</subfield></datafield>
  </record>
  <record format="danMARC2" type="Bibliographic">
    <datafield tag="001" ind1="0" ind2="0"><subfield code="a">2</subfield></datafield>
    <datafield tag="530" ind1="0" ind2="0">
      <subfield code="i">Skammer-serien</subfield>
      <subfield code="d">2</subfield>
      <subfield code="g"></subfield>
    </datafield>
    <datafield tag="534" ind1="0" ind2="0"><subfield code="i">Katriona-universet</subfield></datafield>
  </record>
  <record format="danMARC2" type="Bibliographic">
    <datafield tag="001" ind1="0" ind2="0"><subfield code="a">3</subfield></datafield>
  </record>
</collection>"#;

fn run_stream(xml: &str) -> String {
    let mut out: Vec<u8> = Vec::new();

    let mut stream = SeriesStream::begin(&mut out).unwrap();
    for record in Record::from_xml(xml) {
        stream.write_record(&record.unwrap()).unwrap();
    }
    stream.finish().unwrap();

    String::from_utf8(out).unwrap()
}

#[test]
fn empty_run_frames_nothing() {
    let mut out: Vec<u8> = Vec::new();
    let stream = SeriesStream::begin(&mut out).unwrap();
    let (records_in, objects_out) = stream.finish().unwrap();

    assert_eq!(records_in, 0);
    assert_eq!(objects_out, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "[\n]\n");
}

#[test]
fn every_object_is_comma_terminated() {
    let output = run_stream(COLLECTION_XML);

    assert_eq!(
        output,
        r#"[
{"workId":"870970-basis:1","seriesTitle":"Skammer-serien","numberInSeries":["1"],"readFirst":true,"universeTitle":"Katriona-universet"},
{"workId":"870970-basis:2","seriesTitle":"Skammer-serien","numberInSeries":["2"],"canBeReadIndependently":true,"universeTitle":"Katriona-universet"},
{"workId":"870970-basis:3"},
]
"#
    );
}

#[test]
fn counts_cover_the_whole_run() {
    let mut out: Vec<u8> = Vec::new();

    let mut stream = SeriesStream::begin(&mut out).unwrap();
    for record in Record::from_xml(COLLECTION_XML) {
        stream.write_record(&record.unwrap()).unwrap();
    }
    let (records_in, objects_out) = stream.finish().unwrap();

    assert_eq!(records_in, 3);
    assert_eq!(objects_out, 3);
}

#[test]
fn registry_consumes_the_framed_stream() {
    let output = run_stream(COLLECTION_XML);

    let registry = SeriesRegistry::from_output(&output).unwrap();

    assert_eq!(registry.work_count(), 3);
    assert_eq!(registry.series_count(), 1);
    assert_eq!(registry.universe_count(), 1);

    let work = registry.work("870970-basis:1").unwrap();
    assert_eq!(work.series_title(), Some("Skammer-serien"));
    assert_eq!(work.number_in_series(), ["1"]);
    assert!(work.read_first());
    assert!(!work.can_be_read_independently());

    let series = registry.series("Skammer-serien").unwrap();
    assert_eq!(series.included_works().len(), 2);
    assert!(series.included_works().contains("870970-basis:1"));
    assert!(series.included_works().contains("870970-basis:2"));

    let universe = registry.universe("Katriona-universet").unwrap();
    assert!(universe.included_series().contains("Skammer-serien"));
    assert_eq!(universe.included_works().len(), 2);

    // The record with no series data still registers as a work.
    let plain = registry.work("870970-basis:3").unwrap();
    assert!(plain.series_title().is_none());
}
