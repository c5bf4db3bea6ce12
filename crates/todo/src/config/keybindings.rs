//! Keybindings configuration for the TUI.

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TUI configuration.
    #[serde(default)]
    pub tui: TuiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Keybindings configuration.
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

/// Keybindings for both focusable views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Keybindings while the task list has focus.
    #[serde(default)]
    pub task_list: TaskListKeyBindings,
    /// Keybindings while the entry form has focus.
    #[serde(default)]
    pub entry_form: EntryFormKeyBindings,
}

/// Keybindings for the task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskListKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Move the cursor down.
    pub down: Vec<String>,
    /// Move the cursor up.
    pub up: Vec<String>,
    /// Activate the completion checkbox of the selected task.
    pub toggle: Vec<String>,
    /// Activate the delete control of the selected task.
    pub delete: Vec<String>,
    /// Move focus to the entry form.
    pub focus_form: Vec<String>,
}

/// Keybindings for the entry form.
///
/// Plain printable characters are typed into the draft, so only keys with a
/// modifier or named keys (`Enter`, `Tab`, ...) can be bound here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryFormKeyBindings {
    /// Submit the draft.
    pub submit: Vec<String>,
    /// Move focus to the task list.
    pub focus_list: Vec<String>,
}

impl Default for TaskListKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Q", "Esc"],
            down: vec_of_strings!["j", "J", "Down"],
            up: vec_of_strings!["k", "K", "Up"],
            toggle: vec_of_strings!["Space", "x", "X", "Enter"],
            delete: vec_of_strings!["d", "D", "Delete"],
            focus_form: vec_of_strings!["i", "a", "Tab"],
        }
    }
}

impl Default for EntryFormKeyBindings {
    fn default() -> Self {
        Self {
            submit: vec_of_strings!["Enter"],
            focus_list: vec_of_strings!["Esc", "Tab"],
        }
    }
}

/// Returns the default configuration file path.
///
/// On Linux: `~/.config/todo-list/config.toml`
/// On macOS: `~/Library/Application Support/todo-list/config.toml`
/// On Windows: `%APPDATA%\todo-list\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("todo-list").join("config.toml"))
}

/// Generate default configuration as TOML string.
pub fn generate_default_config_toml() -> Result<String> {
    let config = Config::default();

    let toml_str = toml::to_string_pretty(&config).context("failed to serialize default configuration")?;

    let header = r#"# todo-list configuration
#
# Key syntax:
#   single characters: "j", "Q", "?"
#   named keys: "Enter", "Esc", "Space", "Tab", "Backspace", "Delete",
#               "Up", "Down", "Left", "Right", "Home", "End", "PageUp", "PageDown"
#   modifiers: "Ctrl+d", "Alt+Enter", "Shift+Tab"
#
# Entry form bindings cannot use plain characters; those are typed into the draft.

"#;

    Ok(format!("{header}{toml_str}"))
}

/// Load the configuration file.
///
/// With no explicit `path`, a missing file at the default location yields
/// `Ok(None)`. An explicit `path` must exist.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("Config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(None),
        },
    };

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Enter" -> `KeyCode::Enter`
/// - "Ctrl+d" -> `KeyCode::Char('d')` with CONTROL modifier
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    // "+" on its own is the plus key, not a separator.
    if s == "+" {
        return Ok(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
    }

    let parts: Vec<&str> = s.split('+').collect();
    let Some((&key_part, modifier_parts)) = parts.split_last() else {
        bail!("Empty key string");
    };

    let mut modifiers = KeyModifiers::NONE;
    for &modifier in modifier_parts {
        match modifier {
            "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
            "Alt" => modifiers |= KeyModifiers::ALT,
            "Shift" => modifiers |= KeyModifiers::SHIFT,
            other => bail!("Unknown modifier: {other}"),
        }
    }

    let code = parse_key_code(key_part)?;

    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Space" => Ok(KeyCode::Char(' ')),
        "Backspace" => Ok(KeyCode::Backspace),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "Delete" => Ok(KeyCode::Delete),
        "Insert" => Ok(KeyCode::Insert),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        "" => bail!("Empty key string"),
        other => bail!("Unknown key: {other}"),
    }
}

/// Whether `key` would be typed into a text input rather than act as a command.
const fn is_text_input(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(_))
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL.union(KeyModifiers::ALT))
}

/// Validate the TUI configuration.
///
/// Checks for:
/// - Empty key bindings
/// - Invalid key expressions
/// - Key conflicts within each view
/// - Plain characters bound in the entry form
pub fn validate_tui_config(config: &TuiConfig) -> Result<()> {
    validate_keybindings_config(&config.keybindings)
}

/// Validate the keybindings configuration.
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    for (view, bindings) in collect_bindings(config) {
        validate_view(view, &bindings)?;
    }
    Ok(())
}

fn validate_view(view: ViewType, bindings: &[(Action, &[String])]) -> Result<()> {
    let view_name = view.config_name();
    let mut key_to_actions: HashMap<KeyEvent, Vec<String>> = HashMap::new();

    for &(action, keys) in bindings {
        let name = format!("{view_name}.{}", action.config_name());
        if keys.is_empty() {
            bail!("{name} must have at least one key binding");
        }
        for key in keys {
            let event = parse_key(key).with_context(|| format!("Invalid key '{key}' in {name}"))?;
            if view == ViewType::EntryForm && is_text_input(&event) {
                bail!("Key '{key}' in {name} would be typed into the entry form; use a named key or a Ctrl/Alt combination");
            }
            key_to_actions
                .entry(normalize(event))
                .or_default()
                .push(action.config_name().to_owned());
        }
    }

    for (key, mut actions) in key_to_actions {
        actions.dedup();
        if actions.len() > 1 {
            bail!(
                "Key '{}' is bound to multiple actions in {view_name}: {actions:?}",
                describe_key(&key)
            );
        }
    }

    Ok(())
}

fn collect_bindings(config: &KeyBindingsConfig) -> [(ViewType, Vec<(Action, &[String])>); 2] {
    let list = &config.task_list;
    let form = &config.entry_form;
    [
        (
            ViewType::TaskList,
            vec![
                (Action::Quit, list.quit.as_slice()),
                (Action::Down, list.down.as_slice()),
                (Action::Up, list.up.as_slice()),
                (Action::Toggle, list.toggle.as_slice()),
                (Action::Delete, list.delete.as_slice()),
                (Action::FocusForm, list.focus_form.as_slice()),
            ],
        ),
        (
            ViewType::EntryForm,
            vec![
                (Action::Submit, form.submit.as_slice()),
                (Action::FocusList, form.focus_list.as_slice()),
            ],
        ),
    ]
}

/// Character keys ignore Shift: the character itself already carries the case.
fn normalize(mut key: KeyEvent) -> KeyEvent {
    if matches!(key.code, KeyCode::Char(_)) {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(key.code, key.modifiers)
}

fn describe_key(key: &KeyEvent) -> String {
    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push_str("Ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        out.push_str("Shift+");
    }
    match key.code {
        KeyCode::Char(' ') => out.push_str("Space"),
        KeyCode::Char(c) => out.push(c),
        other => out.push_str(&format!("{other:?}")),
    }
    out
}

/// View that owns the keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Task list.
    TaskList,
    /// Entry form.
    EntryForm,
}

impl ViewType {
    const fn config_name(self) -> &'static str {
        match self {
            Self::TaskList => "task_list",
            Self::EntryForm => "entry_form",
        }
    }
}

/// Action that can be performed in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Move down.
    Down,
    /// Move up.
    Up,
    /// Toggle completion of the selected task.
    Toggle,
    /// Delete the selected task.
    Delete,
    /// Focus the entry form.
    FocusForm,
    /// Submit the draft.
    Submit,
    /// Focus the task list.
    FocusList,
}

impl Action {
    const fn config_name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Down => "down",
            Self::Up => "up",
            Self::Toggle => "toggle",
            Self::Delete => "delete",
            Self::FocusForm => "focus_form",
            Self::Submit => "submit",
            Self::FocusList => "focus_list",
        }
    }
}

impl KeyBindingsConfig {
    /// Check if a key event matches the given action in the given view.
    pub fn matches(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        let actual = normalize(*key);
        self.get_keys(view, action)
            .iter()
            .filter_map(|key_str| parse_key(key_str).ok())
            .any(|expected| {
                let expected = normalize(expected);
                expected.code == actual.code && expected.modifiers == actual.modifiers
            })
    }

    /// First configured key for an action, for on-screen hints.
    pub fn hint(&self, view: ViewType, action: Action) -> &str {
        self.get_keys(view, action).first().map_or("?", String::as_str)
    }

    fn get_keys(&self, view: ViewType, action: Action) -> &[String] {
        match (view, action) {
            (ViewType::TaskList, Action::Quit) => &self.task_list.quit,
            (ViewType::TaskList, Action::Down) => &self.task_list.down,
            (ViewType::TaskList, Action::Up) => &self.task_list.up,
            (ViewType::TaskList, Action::Toggle) => &self.task_list.toggle,
            (ViewType::TaskList, Action::Delete) => &self.task_list.delete,
            (ViewType::TaskList, Action::FocusForm) => &self.task_list.focus_form,
            (ViewType::EntryForm, Action::Submit) => &self.entry_form.submit,
            (ViewType::EntryForm, Action::FocusList) => &self.entry_form.focus_list,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Display;

    fn expect_ok<T, E: Display>(result: Result<T, E>, ctx: &str) -> T {
        match result {
            Ok(value) => value,
            Err(err) => panic!("{ctx}: {err}"),
        }
    }

    fn expect_err<T>(result: Result<T>, ctx: &str) -> anyhow::Error {
        match result {
            Ok(_) => panic!("{ctx}"),
            Err(err) => err,
        }
    }

    #[test]
    fn test_default_keybindings() {
        let config = KeyBindingsConfig::default();

        assert_eq!(config.task_list.quit, vec!["q", "Q", "Esc"]);
        assert_eq!(config.task_list.down, vec!["j", "J", "Down"]);
        assert_eq!(config.task_list.up, vec!["k", "K", "Up"]);
        assert_eq!(config.task_list.toggle, vec!["Space", "x", "X", "Enter"]);
        assert_eq!(config.task_list.delete, vec!["d", "D", "Delete"]);
        assert_eq!(config.task_list.focus_form, vec!["i", "a", "Tab"]);

        assert_eq!(config.entry_form.submit, vec!["Enter"]);
        assert_eq!(config.entry_form.focus_list, vec!["Esc", "Tab"]);
    }

    #[test]
    fn test_defaults_pass_validation() {
        expect_ok(
            validate_keybindings_config(&KeyBindingsConfig::default()),
            "default keybindings must validate",
        );
    }

    #[test]
    fn test_deserialize_partial_toml_fills_defaults() {
        let toml_str = r#"
            [tui.keybindings.task_list]
            quit = ["Ctrl+q"]
        "#;

        let config: Config = expect_ok(toml::from_str(toml_str), "partial config must parse");
        let bindings = &config.tui.keybindings;
        assert_eq!(bindings.task_list.quit, vec!["Ctrl+q"]);
        assert_eq!(bindings.task_list.down, vec!["j", "J", "Down"]);
        assert_eq!(bindings.entry_form.submit, vec!["Enter"]);
    }

    #[test]
    fn test_parse_key() {
        let key = expect_ok(parse_key("j"), "plain char");
        assert_eq!(key.code, KeyCode::Char('j'));
        assert_eq!(key.modifiers, KeyModifiers::NONE);

        let key = expect_ok(parse_key("Space"), "space");
        assert_eq!(key.code, KeyCode::Char(' '));

        let key = expect_ok(parse_key("Ctrl+d"), "ctrl combo");
        assert_eq!(key.code, KeyCode::Char('d'));
        assert_eq!(key.modifiers, KeyModifiers::CONTROL);

        let key = expect_ok(parse_key("+"), "plus key");
        assert_eq!(key.code, KeyCode::Char('+'));

        assert!(parse_key("Hyper+x").is_err());
        assert!(parse_key("NotAKey").is_err());
        assert!(parse_key("").is_err());
    }

    #[test]
    fn test_matches_ignores_shift_on_characters() {
        let config = KeyBindingsConfig::default();
        let shifted_q = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert!(config.matches(ViewType::TaskList, Action::Quit, &shifted_q));

        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert!(!config.matches(ViewType::TaskList, Action::Down, &ctrl_j));
    }

    #[test]
    fn test_matches_is_scoped_to_view() {
        let config = KeyBindingsConfig::default();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(config.matches(ViewType::EntryForm, Action::Submit, &enter));
        assert!(!config.matches(ViewType::TaskList, Action::Submit, &enter));
    }

    #[test]
    fn test_conflicting_keys_are_rejected() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.delete.push("j".into());

        let err = expect_err(validate_keybindings_config(&config), "conflict must fail");
        assert!(err.to_string().contains("multiple actions"), "{err}");
    }

    #[test]
    fn test_empty_binding_is_rejected() {
        let mut config = KeyBindingsConfig::default();
        config.entry_form.submit.clear();

        let err = expect_err(validate_keybindings_config(&config), "empty must fail");
        assert!(err.to_string().contains("entry_form.submit"), "{err}");
    }

    #[test]
    fn test_plain_characters_rejected_in_entry_form() {
        let mut config = KeyBindingsConfig::default();
        config.entry_form.submit = vec!["s".into()];

        let err = expect_err(validate_keybindings_config(&config), "plain char must fail");
        assert!(err.to_string().contains("typed into the entry form"), "{err}");

        config.entry_form.submit = vec!["Ctrl+s".into()];
        expect_ok(validate_keybindings_config(&config), "ctrl combo is allowed");
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let mut config = KeyBindingsConfig::default();
        config.task_list.up = vec!["Sideways".into()];

        let err = expect_err(validate_keybindings_config(&config), "bad key must fail");
        assert!(format!("{err:#}").contains("Unknown key"), "{err:#}");
    }

    #[test]
    fn test_generated_default_config_round_trips() {
        let toml_str = expect_ok(generate_default_config_toml(), "generate");
        assert!(toml_str.starts_with("# todo-list configuration"));

        let config: Config = expect_ok(toml::from_str(&toml_str), "generated config must parse");
        assert_eq!(config.tui.keybindings.task_list.toggle, vec!["Space", "x", "X", "Enter"]);
        expect_ok(validate_tui_config(&config.tui), "generated config must validate");
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let dir = expect_ok(tempfile::tempdir(), "tempdir");
        let path = dir.path().join("config.toml");
        expect_ok(
            std::fs::write(&path, "[tui.keybindings.entry_form]\nsubmit = [\"Ctrl+s\"]\n"),
            "write config",
        );

        let config = expect_ok(load_config(Some(path.as_path())), "load");
        let Some(config) = config else {
            panic!("explicit config must load");
        };
        assert_eq!(config.tui.keybindings.entry_form.submit, vec!["Ctrl+s"]);
    }

    #[test]
    fn test_load_config_missing_explicit_path_fails() {
        let dir = expect_ok(tempfile::tempdir(), "tempdir");
        let err = expect_err(load_config(Some(dir.path().join("absent.toml").as_path())), "must fail");
        assert!(err.to_string().contains("not found"), "{err}");
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let dir = expect_ok(tempfile::tempdir(), "tempdir");
        let path = dir.path().join("config.toml");
        expect_ok(std::fs::write(&path, "[tui.keybindings\n"), "write config");

        let err = expect_err(load_config(Some(path.as_path())), "must fail");
        assert!(err.to_string().contains("Failed to parse"), "{err}");
    }
}
