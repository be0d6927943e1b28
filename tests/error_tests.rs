use treedump::{CollectError, OutputError, TreedumpError};

#[test]
fn test_not_found_display() {
    let err = CollectError::not_found("missing");
    assert_eq!(err.to_string(), "Path not found: missing");
}

#[test]
fn test_create_error_display() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
    let err = OutputError::create("/no/such/dir/out.txt", io);
    assert!(err.to_string().contains("Failed to create output file"));
    assert!(err.to_string().contains("/no/such/dir/out.txt"));
}

#[test]
fn test_treedump_error_from_collect_error() {
    let collect_err = CollectError::not_found("dir1");
    let err: TreedumpError = collect_err.into();
    assert!(matches!(err, TreedumpError::Collect(_)));
}

#[test]
fn test_treedump_error_from_output_error() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let err: TreedumpError = OutputError::from(io).into();
    assert!(matches!(err, TreedumpError::Output(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn test_usage_error() {
    let err = TreedumpError::usage("compare mode requires two paths");
    assert_eq!(
        err.to_string(),
        "Invalid usage: compare mode requires two paths"
    );
}
