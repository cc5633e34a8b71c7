use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SOURCE: &str = "\
<?xml version=\"1.0\" encoding=\"utf-8\"?>
<resources>
    <string name=\"app_name\">My App</string>
    <string name=\"greeting\">Hello</string>
    <!-- onboarding -->
    <string name=\"welcome\">Welcome</string>
</resources>
";

fn langsync_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("langsync"))
}

/// `res/values/strings.xml` plus one `values-<locale>/strings.xml` per entry.
fn project(targets: &[(&str, &str)]) -> (TempDir, PathBuf, Vec<PathBuf>) {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    fs::create_dir_all(res.join("values")).unwrap();
    let source = res.join("values").join("strings.xml");
    fs::write(&source, SOURCE).unwrap();

    let paths = targets
        .iter()
        .map(|(locale, content)| {
            let dir = res.join(format!("values-{}", locale));
            fs::create_dir_all(&dir).unwrap();
            let path = dir.join("strings.xml");
            fs::write(&path, content).unwrap();
            path
        })
        .collect();
    (temp_dir, source, paths)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_sync_discovers_sibling_locales() {
    let fr = "<resources>\n    <string name=\"greeting\">Bonjour</string>\n</resources>\n";
    let de = "<resources>\n    <string name=\"welcome\">Willkommen</string>\n</resources>\n";
    let (_dir, source, targets) = project(&[("fr", fr), ("de", de)]);

    let output = langsync_cmd()
        .args(["sync", "--source", path_str(&source)])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sync complete: 2 target file(s)"));
    assert!(stdout.contains("[fr]: 1 preserved, 2 placeholder(s), 0 dropped"));

    let synced_fr = fs::read_to_string(&targets[0]).unwrap();
    assert!(synced_fr.contains("\t<string name=\"greeting\">Bonjour</string>\r\n"));
    assert!(synced_fr.contains("\t<string name=\"app_name\">My App</string>\r\n"));
    assert!(synced_fr.contains("\t<!-- onboarding -->\r\n"));

    let synced_de = fs::read_to_string(&targets[1]).unwrap();
    assert!(synced_de.contains("\t<string name=\"welcome\">Willkommen</string>\r\n"));
}

#[test]
fn test_sync_with_explicit_glob_target() {
    let empty = "<resources>\n</resources>\n";
    let (dir, source, targets) = project(&[("fr", empty), ("es", empty)]);
    let pattern = format!("{}/res/values-f*/strings.xml", dir.path().display());

    let output = langsync_cmd()
        .args(["sync", "-s", path_str(&source), "-t", &pattern])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(fs::read_to_string(&targets[0]).unwrap().contains("My App"));
    assert_eq!(fs::read_to_string(&targets[1]).unwrap(), empty);
}

#[test]
fn test_sync_without_targets_prints_notice() {
    let (_dir, source, _) = project(&[]);

    let output = langsync_cmd()
        .args(["sync", "--source", path_str(&source)])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("nothing to do"));
}

#[test]
fn test_failed_sync_leaves_targets_unchanged() {
    let good = "<resources>\n    <string name=\"greeting\">Hola</string>\n</resources>\n";
    let bad = "<resources>\n    <string>no key here</string>\n</resources>\n";
    let (dir, source, targets) = project(&[("es", good), ("it", bad)]);
    let report = dir.path().join("report.json");

    let output = langsync_cmd()
        .args([
            "sync",
            "--source",
            path_str(&source),
            "--report-json",
            path_str(&report),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Sync failed"));
    assert!(stderr.contains("malformed entry"));
    assert!(stderr.contains("All target files were left unchanged."));

    assert_eq!(fs::read_to_string(&targets[0]).unwrap(), good);
    assert_eq!(fs::read_to_string(&targets[1]).unwrap(), bad);
    for target in &targets {
        assert!(!target.parent().unwrap().join(".tmp.xml").exists());
    }

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["result"]["status"], "failed");
    assert_eq!(json["result"]["untouched"].as_array().unwrap().len(), 2);
    assert_eq!(json["result"]["committed"].as_array().unwrap().len(), 0);
}

#[test]
fn test_report_json_on_success() {
    let fr = "<resources>\n    <string name=\"greeting\">Bonjour</string>\n    <string name=\"gone\">Parti</string>\n</resources>\n";
    let (dir, source, _) = project(&[("fr", fr)]);
    let report = dir.path().join("report.json");

    let output = langsync_cmd()
        .args([
            "sync",
            "--source",
            path_str(&source),
            "--report-json",
            path_str(&report),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["strict"], false);
    assert_eq!(json["result"]["status"], "synced");
    let target = &json["result"]["targets"][0];
    assert_eq!(target["locale"], "fr");
    assert_eq!(target["preserved"], 1);
    assert_eq!(target["placeholders"], 2);
    assert_eq!(target["dropped"], 1);
}

#[test]
fn test_strict_rejects_string_array_source() {
    let empty = "<resources>\n</resources>\n";
    let (_dir, source, targets) = project(&[("fr", empty)]);
    fs::write(
        &source,
        "<resources>\n    <string-array name=\"days\">\n        <item>Mon</item>\n    </string-array>\n</resources>\n",
    )
    .unwrap();

    let output = langsync_cmd()
        .args(["sync", "--source", path_str(&source), "--strict"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("string-array"));
    assert_eq!(fs::read_to_string(&targets[0]).unwrap(), empty);
}

#[test]
fn test_config_file_supplies_targets() {
    let empty = "<resources>\n</resources>\n";
    let (dir, source, targets) = project(&[("fr", empty), ("de", empty)]);
    fs::write(
        dir.path().join("langsync.toml"),
        "[sync]\ntargets = [\"res/values-de/strings.xml\"]\ntemp_file_name = \".partial.xml\"\n",
    )
    .unwrap();

    let output = langsync_cmd()
        .current_dir(dir.path())
        .args(["sync", "--source", path_str(&source)])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(fs::read_to_string(&targets[0]).unwrap(), empty);
    assert!(fs::read_to_string(&targets[1]).unwrap().contains("My App"));
    assert!(!targets[1].parent().unwrap().join(".partial.xml").exists());
}

#[test]
fn test_missing_explicit_config_fails() {
    let (_dir, source, _) = project(&[]);

    let output = langsync_cmd()
        .args([
            "sync",
            "--source",
            path_str(&source),
            "--config",
            "/no/such/langsync.toml",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read config"));
}
