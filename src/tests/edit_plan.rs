use super::{Change, Edit, EditPlan};
use crate::error::IniError;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = "[server]\nhost=a\nport=80\n\n[client]\nretries=3\n";

fn edit(file_name: &str, section: &str, change: Change) -> Edit {
    Edit {
        file_name: file_name.to_string(),
        section: section.to_string(),
        change,
    }
}

#[test]
fn test_plan_from_json() {
    let json = r#"{"edits": [
        {"file_name": "a.ini", "section": "s", "op": "set", "key": "k", "value": "v"},
        {"file_name": "a.ini", "op": "remove_key", "key": "top"},
        {"file_name": "b.ini", "section": "old", "op": "remove_section"}
    ]}"#;
    let plan: EditPlan = serde_json::from_str(json).unwrap();
    assert_eq!(plan.edits.len(), 3);
    assert_eq!(
        plan.edits[0].change,
        Change::Set {
            key: "k".to_string(),
            value: "v".to_string()
        }
    );
    assert_eq!(plan.edits[1].section, "");
    assert_eq!(plan.edits[2].change, Change::RemoveSection);
}

#[test]
fn test_apply_edits_to_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{SAMPLE}").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let plan = EditPlan {
        edits: vec![
            edit(
                &path,
                "server",
                Change::Set {
                    key: "port".to_string(),
                    value: "8080".to_string(),
                },
            ),
            edit(
                &path,
                "server",
                Change::RenameKey {
                    key: "host".to_string(),
                    to: "hostname".to_string(),
                },
            ),
            edit(
                &path,
                "client",
                Change::RemoveKey {
                    key: "retries".to_string(),
                },
            ),
            edit(
                &path,
                "client",
                Change::RenameSection {
                    to: "worker".to_string(),
                },
            ),
            edit(
                &path,
                "worker",
                Change::Set {
                    key: "threads".to_string(),
                    value: "4".to_string(),
                },
            ),
        ],
    };

    let written = plan.apply().unwrap();
    assert_eq!(written, vec![file.path().to_path_buf()]);
    assert_eq!(
        fs::read_to_string(file.path()).unwrap(),
        "[server]\nhostname=a\nport=8080\n\n[worker]\nthreads=4\n"
    );
}

#[test]
fn test_failed_edit_leaves_file_untouched() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{SAMPLE}").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let plan = EditPlan {
        edits: vec![
            edit(
                &path,
                "server",
                Change::Set {
                    key: "port".to_string(),
                    value: "1".to_string(),
                },
            ),
            edit(
                &path,
                "missing",
                Change::RemoveKey {
                    key: "k".to_string(),
                },
            ),
        ],
    };

    assert!(matches!(plan.apply(), Err(IniError::SectionNotFound(_))));
    assert_eq!(fs::read_to_string(file.path()).unwrap(), SAMPLE);
}

#[test]
fn test_missing_file_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new.ini");

    let plan = EditPlan {
        edits: vec![edit(
            &path.to_string_lossy(),
            "",
            Change::Set {
                key: "name".to_string(),
                value: "fresh".to_string(),
            },
        )],
    };

    assert_eq!(plan.apply().unwrap(), vec![path.clone()]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "name=fresh\n");
}

#[test]
fn test_unchanged_file_is_not_written() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{SAMPLE}").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let plan = EditPlan {
        edits: vec![edit(
            &path,
            "SERVER",
            Change::Set {
                key: "Port".to_string(),
                value: "80".to_string(),
            },
        )],
    };

    assert!(plan.apply().unwrap().is_empty());
}

#[test]
fn test_from_path_rejects_malformed_plan() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"edits": [{{"file_name": "a.ini", "op": "explode"}}]}}"#).unwrap();
    assert!(matches!(
        EditPlan::from_path(file.path()),
        Err(IniError::Plan(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        EditPlan::from_path(dir.path().join("absent.json")),
        Err(IniError::Io { .. })
    ));
}
