use super::Status;

#[test]
fn displays_variant_names() {
    assert_eq!("Running", Status::Running.to_string());
    assert_eq!("Stopped", Status::Stopped.to_string());
    assert_eq!("Unknown", Status::Unknown.to_string());
}

#[cfg(feature = "pretty-print")]
#[test]
fn pretty_print_keeps_text() {
    let printed = Status::Running.pretty_print();
    assert!(printed.contains("Running"));
    assert_ne!("Running", printed);
}
