//! A realistic editor configuration — comments, trailing commas, quoted and
//! bare keys, deep nesting — exercised end to end.

use hujson_core::{parse, Payload, Value};

const EDITOR_SETTINGS: &str = r##"
// User settings, kept under version control.
// Lines may be commented out rather than deleted.
{
  editor.fontFamily: "Iosevka SS16, Maple Mono, JetBrains Mono NL, Menlo",
  editor.fontSize: 14,
  editor.tabSize: 8,
  editor.detectIndentation: false,
  editor.trimAutoWhitespace: true,
  editor.wordWrap: "on",
  editor.wordWrapColumn: 80,
  editor.rulers: [80, 100,],
  /* Cursor and rendering. */
  editor.cursorBlinking: "solid",
  editor.cursorStyle: "line",
  editor.minimap(enabled): false,
  workbench.startupEditor: "none",
  workbench.colorTheme: "Everforest Dark",
  workbench.editor.showTabs: false,
  terminal.integrated.fontSize: 14,
  terminal.integrated.inheritEnv: false,

  "[go]": {
    editor.insertSpaces: false,
    editor.formatOnSave: true,
    editor.codeActionsOnSave: {
      "source.organizeImports": true,
    },
    editor.tabSize: 2,
  },
  "[rust]": {
    editor.defaultFormatter: "rust-lang.rust-analyzer",
    editor.formatOnSave: true,
    // editor.semanticHighlighting.enabled: true,
    editor.tabSize: 4,
  },
  "[markdown]": {
    editor.tabSize: 4,
    editor.useTabStops: false,
  },

  files.associations: {
    "*.hujson": "jsonc",
    "*.tpl": "helm",
  },
  files.watcherExclude: {
    "**/target/**": true,
    "**/.git/objects/**": true,
  },

  search.exclude: {
    "**/node_modules": true,
    "**/dist": true,
  },

  json.schemas: [
    {
      fileMatch: ["*.hujson",],
      schema: {
        allowTrailingCommas: true,
        allowComments: true,
      },
    },
  ],

  better_comments.tags: [
    { tag: "!", color: "#FF2D00", strikethrough: false, },
    { tag: "?", color: "#3498DB", strikethrough: false, },
    { tag: "TODO", color: "#be99ff", strikethrough: false, },
  ],

  // Numbers in assorted notations survive untouched.
  telemetry.sampleRate: 0.25,
  telemetry.flushIntervalMs: 3e4,
  telemetry.maxQueue: 1000,

  // "window.nativeTabs": true,
  window.zoomLevel: -1,
  git.openRepositoryInParentFolders: "never",
  update.mode: "manual",
}
"##;

/// Every node's offset span of `packed` must equal the node packed without
/// its own before/after extras.
fn check_offsets(packed: &[u8], value: &Value) {
    let mut bare = value.clone();
    bare.before_extra.clear();
    bare.after_extra.clear();
    assert_eq!(&packed[value.start_offset..value.end_offset], &bare.pack()[..]);
    match &value.payload {
        Payload::Literal(_) => {}
        Payload::Object(obj) => {
            for member in &obj.members {
                check_offsets(packed, &member.name);
                check_offsets(packed, &member.value);
            }
        }
        Payload::Array(arr) => {
            for element in &arr.elements {
                check_offsets(packed, element);
            }
        }
    }
}

#[test]
fn settings_roundtrip_byte_for_byte() {
    let value = parse(EDITOR_SETTINGS.as_bytes()).expect("settings must parse");
    assert_eq!(String::from_utf8_lossy(&value.pack()), EDITOR_SETTINGS);
}

#[test]
fn settings_offsets_are_consistent() {
    let value = parse(EDITOR_SETTINGS.as_bytes()).expect("settings must parse");
    check_offsets(&value.pack(), &value);
}

#[test]
fn settings_are_not_standard_json() {
    let value = parse(EDITOR_SETTINGS.as_bytes()).expect("settings must parse");
    assert!(!value.is_standard());
}

#[test]
fn standardized_settings_are_plain_json() {
    let mut value = parse(EDITOR_SETTINGS.as_bytes()).expect("settings must parse");
    value.standardize();
    assert!(value.is_standard());

    let packed = value.pack();
    let json: serde_json::Value =
        serde_json::from_slice(&packed).expect("standardized settings must be standard JSON");
    assert_eq!(json["editor.tabSize"], serde_json::json!(8));
    assert_eq!(json["[go]"]["editor.tabSize"], serde_json::json!(2));
    assert_eq!(json["json.schemas"][0]["schema"]["allowComments"], serde_json::json!(true));

    // Standardizing again changes nothing.
    let mut twice = parse(&packed).expect("standardized settings must reparse");
    twice.standardize();
    assert_eq!(twice.pack(), packed);
}

#[test]
fn minimized_settings_reparse_and_quote_cleanly() {
    let mut value = parse(EDITOR_SETTINGS.as_bytes()).expect("settings must parse");
    value.minimize();

    let packed = value.pack();
    assert_eq!(parse(&packed).expect("minimized settings must reparse"), value);

    // Bare keys survive minimization; quoting them at pack time yields JSON
    // that a strict parser accepts.
    let quoted = value.pack_with_quoted_keys();
    let json: serde_json::Value =
        serde_json::from_slice(&quoted).expect("quoted-key output must be standard JSON");
    assert_eq!(json["workbench.colorTheme"], serde_json::json!("Everforest Dark"));
    assert_eq!(json["window.zoomLevel"], serde_json::json!(-1));
}
