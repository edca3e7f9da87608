//! Integration tests for parsing, field access and sequencing

use hl7_message::{
    Delimiters, LayoutRegistry, Message, ParseError, ParserConfig, ResolutionError, Segment,
    SegmentFactory, SegmentQuery,
};

const ORU: &str = "MSH|^~\\&|LAB|HOSP|EHR|HOSP|20240101120000||ORU^R01|MSG00042|P|2.5\r\
PID|1||4711^^^MRN||Smith^Anna||19800115|F\r\
OBR|1|ORD1||CBC^Complete blood count\r\
OBX|1|NM|HGB||13.5|g/dL|12-16|N\r\
OBX|2|NM|WBC||7.1|10*9/L|4-11|N\r\
NTE|1||Fasting sample|\r\
ZZZ|custom|payload||";

#[test]
fn test_literal_scenario() {
    let msg = Message::parse("MSH|^~\\&|A|B|C|D\rPID|1||123||Doe^John").unwrap();

    assert_eq!(msg.len(), 2);
    assert_eq!(msg[0].type_id(), "MSH");
    assert_eq!(msg[0].read_field("sending_app").unwrap(), Some("A"));
    assert_eq!(msg[1].type_id(), "PID");
    assert_eq!(msg[1].read_field("patient_id").unwrap(), Some(""));
    assert_eq!(msg[1].read_field("patient_name").unwrap(), Some("Doe^John"));
}

#[test]
fn test_round_trip_preserves_structure() {
    let original = Message::parse(ORU).unwrap();
    let reparsed = Message::parse(original.to_hl7().as_str()).unwrap();

    assert_eq!(reparsed.len(), original.len());
    for (a, b) in original.iter().zip(reparsed.iter()) {
        assert_eq!(a.type_id(), b.type_id());
        assert_eq!(a.fields(), b.fields());
    }
    assert_eq!(reparsed.to_hl7(), ORU);
}

#[test]
fn test_round_trip_keeps_trailing_empty_fields() {
    let msg = Message::parse(ORU).unwrap();
    let nte = msg.by_type("NTE").and_then(|q| q.as_one()).unwrap();
    assert_eq!(nte.len(), 5);

    let zzz = msg.by_type("ZZZ").and_then(|q| q.as_one()).unwrap();
    assert_eq!(zzz.fields(), &["ZZZ", "custom", "payload", "", ""]);
}

#[test]
fn test_unknown_type_tolerance() {
    let msg = Message::parse("ZZZ|foo|bar").unwrap();
    assert_eq!(msg.len(), 1);
    assert!(msg[0].is_generic());
    assert_eq!(msg[0].read_field(0).unwrap(), Some("ZZZ"));
}

#[test]
fn test_singleton_collapse() {
    let msg = Message::parse(ORU).unwrap();

    match msg.by_type("PID") {
        Some(SegmentQuery::One(pid)) => {
            assert_eq!(pid.repetitions("patient_name").unwrap(), vec!["Smith", "Anna"])
        }
        other => panic!("expected a single PID, got {:?}", other),
    }
    match msg.by_type("OBX") {
        Some(SegmentQuery::Many(obx)) => assert_eq!(obx.len(), 2),
        other => panic!("expected several OBX, got {:?}", other),
    }
}

#[test]
fn test_padding_on_write() {
    let mut seg = SegmentFactory::standard().build("NTE|1").unwrap();
    assert_eq!(seg.len(), 2);

    seg.write_field(6, "late").unwrap();

    assert_eq!(seg.len(), 7);
    assert!(seg.fields()[2..6].iter().all(String::is_empty));
    assert_eq!(seg.read_field(6).unwrap(), Some("late"));
}

#[test]
fn test_consecutive_auto_numbering() {
    let factory = SegmentFactory::standard();
    let mut msg = Message::parse("MSH|^~\\&").unwrap();

    for _ in 0..3 {
        msg.append(factory.create("NTE"));
    }
    let ids: Vec<_> = msg.iter().skip(1).map(Segment::set_id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);

    msg.append(factory.create("OBX"));
    msg.append(factory.create("NTE"));
    msg.append(factory.create("NTE"));
    let tail: Vec<_> = msg.iter().skip(5).map(Segment::set_id).collect();
    assert_eq!(tail, vec![Some(1), Some(2)]);
}

#[test]
fn test_max_set_id_does_not_overflow() {
    let mut msg = Message::parse("OBX|4294967295|NM\rOBX||NM").unwrap();
    assert_eq!(msg[0].set_id(), Some(u32::MAX));
    assert_eq!(msg[1].read_field("set_id").unwrap(), Some(""));

    msg.resequence();
    assert_eq!(msg.to_hl7(), "OBX|4294967295|NM\rOBX||NM");
}

#[test]
fn test_resequence_idempotent() {
    let mut msg = Message::parse(ORU).unwrap();
    msg.append(SegmentFactory::standard().create("NTE"));
    let first = msg.to_hl7();

    msg.resequence();
    msg.resequence();
    assert_eq!(msg.to_hl7(), first);
}

#[test]
fn test_positional_access_beyond_layout() {
    let msg = Message::parse(ORU).unwrap();
    let obx = &msg[3];

    assert_eq!(obx.read_field("observation_value").unwrap(), Some("13.5"));
    assert_eq!(obx.read_field("element 8").unwrap(), Some("N"));
    assert_eq!(obx.read_field("e40").unwrap(), None);
    assert_eq!(
        obx.read_field("reference_rnage"),
        Err(ResolutionError::UnknownField {
            segment: "OBX".to_string(),
            field: "reference_rnage".to_string(),
        })
    );
}

#[test]
fn test_sort_by_weight_on_request_only() {
    let mut msg = Message::parse("NTE|1||x\rPID|1\rMSH|^~\\&").unwrap();
    assert_eq!(msg.segment_types(), vec!["NTE", "PID", "MSH"]);

    msg.sort_by_weight();
    assert_eq!(msg.segment_types(), vec!["MSH", "PID", "NTE"]);
    assert_eq!(msg.header().map(Segment::type_id), Some("MSH"));
}

#[test]
fn test_no_segments_error() {
    let empty: Vec<&str> = Vec::new();
    assert_eq!(Message::parse(empty).unwrap_err(), ParseError::NoSegments);
}

#[test]
fn test_custom_registry_and_delimiters() {
    let mut registry = LayoutRegistry::with_standard_layouts();
    registry.register("ZPI", 10, [("set_id", 1), ("plan_code", 2)]);

    let delims = Delimiters::new('|', '^', '\n');
    let msg = Message::parse_with("MSH|^~\\&\nZPI||P1\nZPI||P2", delims, &registry).unwrap();

    assert_eq!(msg[2].read_field("planCode").unwrap(), Some("P2"));
    assert_eq!(msg[2].set_id(), Some(2));
    assert_eq!(msg.to_hl7(), "MSH|^~\\&\nZPI|1|P1\nZPI|2|P2");
}

#[test]
fn test_config_drives_parsing() {
    let config = ParserConfig::from_yaml_str(
        "layouts:\n  - type_id: ZRX\n    weight: 9\n    fields: { set_id: 1, drug: 2 }\n",
    )
    .unwrap();

    let msg = config.parse(vec!["MSH|^~\\&", "ZRX||aspirin\rZRX||ibuprofen"]).unwrap();
    let drugs: Vec<_> = msg
        .by_type("ZRX")
        .unwrap()
        .into_vec()
        .into_iter()
        .map(|s| s.read_field("drug").unwrap().unwrap_or_default().to_string())
        .collect();
    assert_eq!(drugs, vec!["aspirin", "ibuprofen"]);
}

#[test]
fn test_config_layout_without_weight_sorts_with_unknown_types() {
    let config = ParserConfig::from_yaml_str(
        "layouts:\n  - type_id: ZAL\n    fields: { set_id: 1 }\n",
    )
    .unwrap();
    let registry = config.build_registry();
    assert_eq!(registry.weight_of("ZAL"), registry.weight_of("ZZZ"));

    // stable sort keeps tied segments in input order
    let mut msg = config.parse("ZZZ|x\rZAL|1\rMSH|^~\\&").unwrap();
    msg.sort_by_weight();
    assert_eq!(msg.segment_types(), vec!["MSH", "ZZZ", "ZAL"]);
}

#[test]
fn test_json_export() {
    let msg = Message::parse(ORU).unwrap();
    let value = msg.to_json_value().unwrap();

    assert_eq!(value["segments"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["segments"][3]["named"]["units"], "g/dL");
}

#[test]
fn test_bundled_layout_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/layouts.yaml");
    let config = ParserConfig::load_from_file(path).unwrap();
    let registry = config.build_registry();

    assert!(registry.contains("ZPI"));
    assert!(registry.weight_of("ZRX") < registry.weight_of("ZZZ"));

    let msg = config.parse("MSH|^~\\&\rZRX||A01|5mg|PO").unwrap();
    assert_eq!(msg[1].read_field("dose").unwrap(), Some("5mg"));
}
