//! Integration smoke tests for `nu_records`

use nu_records::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}
