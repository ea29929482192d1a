use std::{fs, path::Path};

use icon_kit_build::{Diagnostic, Options, ParseError, generate, scan};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        &root.join("icons.toml"),
        r#"
source_root = "vendor/icons"
output_root = "src/icon"
clean = true
categories = ["ui", "brand", "action"]
"#,
    );
    write(&root.join("vendor/icons/ui/icon_arrow_16_black.svg"), "<svg/>");
    write(&root.join("vendor/icons/ui/icon_arrow_16_white.svg"), "<svg/>");
    write(&root.join("vendor/icons/ui/icon_close_24_black.svg"), "<svg/>");
    write(&root.join("vendor/icons/brand/icon_visa_32_color.svg"), "<svg/>");
    write(&root.join("vendor/icons/brand/logo.svg"), "<svg/>");
    write(&root.join("vendor/icons/brand/README.md"), "not an icon");
    dir
}

#[test]
fn generates_tree_and_reports_skipped_files() {
    let dir = workspace();
    let out = dir.path().join("src/icon");
    write(&out.join("stale/old/old.css"), "");
    write(&out.join("icon.jsx"), "// hand written");

    let report = generate(Options::new(dir.path().to_path_buf())).unwrap();
    assert!(report.is_success());
    assert_eq!(report.icons.len(), 4);
    assert_eq!(report.emitted, 4);
    assert_eq!(report.folders, 3);

    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        &report.diagnostics[0],
        Diagnostic::Unparsable {
            error: ParseError::PatternMismatch { .. },
            ..
        }
    ));

    assert!(!out.join("stale").exists());
    assert!(out.join("icon.jsx").exists());
    for file in [
        "ui/arrow/index.js",
        "ui/arrow/arrow.jsx",
        "ui/arrow/arrow.css",
        "ui/arrow/icon_arrow_16_black.svg",
        "ui/arrow/icon_arrow_16_white.svg",
        "ui/close/close.jsx",
        "brand/visa/visa.css",
    ] {
        assert!(out.join(file).is_file(), "{file} missing");
    }

    let css = fs::read_to_string(out.join("ui/arrow/arrow.css")).unwrap();
    assert_eq!(css.matches("Mozilla Public").count(), 1);
    assert!(css.contains(".icon_size_16.icon_name_arrow.icon_theme_alfa-on-white"));
    assert!(css.contains(".icon_size_16.icon_name_arrow.icon_theme_alfa-on-color"));
    let visa = fs::read_to_string(out.join("brand/visa/visa.css")).unwrap();
    assert!(visa.contains(".icon_size_32.icon_name_visa.icon_colored"));
}

#[test]
fn rerun_without_clean_appends_duplicate_rules() {
    let dir = workspace();
    let out = dir.path().join("src/icon");
    let opts = || Options::new(dir.path().to_path_buf()).with_clean(false);

    generate(opts()).unwrap();
    let jsx = fs::read_to_string(out.join("ui/close/close.jsx")).unwrap();
    generate(opts()).unwrap();

    assert_eq!(fs::read_to_string(out.join("ui/close/close.jsx")).unwrap(), jsx);
    let css = fs::read_to_string(out.join("ui/close/close.css")).unwrap();
    assert_eq!(css.matches("Mozilla Public").count(), 1);
    assert_eq!(css.matches(".icon_name_close").count(), 2);
}

#[test]
fn scan_lists_without_writing() {
    let dir = workspace();
    let discovery = scan(Options::new(dir.path().to_path_buf())).unwrap();

    let names: Vec<_> = discovery
        .icons
        .iter()
        .map(|icon| format!("{}/{}/{}", icon.category, icon.name, icon.color))
        .collect();
    assert_eq!(
        names,
        [
            "ui/arrow/black",
            "ui/arrow/white",
            "ui/close/black",
            "brand/visa/color",
        ]
    );
    assert_eq!(discovery.diagnostics.len(), 1);
    assert!(!dir.path().join("src/icon").exists());
}

#[test]
fn custom_templates_and_layout() {
    let dir = workspace();
    write(
        &dir.path().join("icons.toml"),
        r#"
source_root = "vendor/icons"
categories = ["ui"]
index_file = "index.ts"
markup_extension = "tsx"
style_header = "/* generated */\n"

[templates]
markup = "templates/markup.hbs"
"#,
    );
    write(
        &dir.path().join("templates/markup.hbs"),
        "export const {{componentName}} = '{{category}}/{{name}}';\n",
    );

    let report = generate(
        Options::new(dir.path().to_path_buf()).with_output_dir("build/icons".into()),
    )
    .unwrap();
    assert_eq!(report.emitted, 3);

    let out = dir.path().join("build/icons/ui");
    assert_eq!(
        fs::read_to_string(out.join("close/close.tsx")).unwrap(),
        "export const IconClose = 'ui/close';\n"
    );
    assert!(out.join("close/index.ts").is_file());
    assert!(
        fs::read_to_string(out.join("close/close.css"))
            .unwrap()
            .starts_with("/* generated */\n\n.icon_size_24")
    );
}
