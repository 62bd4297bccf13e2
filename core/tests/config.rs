use chat_widget_core::{ConfigError, Corner, WidgetConfig};

#[test]
fn empty_override_keeps_defaults() {
    assert_eq!(WidgetConfig::from_overrides("  "), Ok(WidgetConfig::default()));
}

#[test]
fn built_in_defaults_are_valid() {
    let config = WidgetConfig::default();
    assert!(config.clone().validated().is_ok());
    assert!(config.default_chat_width >= config.min_chat_width);
}

#[test]
fn overrides_merge_over_defaults() {
    let config = WidgetConfig::from_overrides(
        r##"{"defaultPosition":"top-left","minChatWidth":300,"palette":{"primary":"#112233"}}"##,
    )
    .unwrap();
    let defaults = WidgetConfig::default();
    assert_eq!(config.default_position, Corner::TopLeft);
    assert_eq!(config.min_chat_width, 300.0);
    assert_eq!(config.palette.primary, "#112233");
    assert_eq!(config.palette.background, defaults.palette.background);
    assert_eq!(config.button_width, defaults.button_width);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = WidgetConfig::from_overrides("{not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err = WidgetConfig::from_overrides(r#"{"defaultPosition":"center"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn out_of_range_values_name_the_field() {
    let err = WidgetConfig::from_overrides(r#"{"buttonWidth":0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "buttonWidth", .. }));
    let err = WidgetConfig::from_overrides(r#"{"offset":-1}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "offset", .. }));
    let err =
        WidgetConfig::from_overrides(r#"{"minChatWidth":400,"defaultChatWidth":300}"#).unwrap_err();
    assert!(err.to_string().contains("defaultChatWidth"));
}

#[test]
fn transition_duration_must_be_positive() {
    let err = WidgetConfig::from_overrides(r#"{"chrome":{"transitionSecs":0}}"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "chrome.transitionSecs",
            ..
        }
    ));
    let config = WidgetConfig::from_overrides(r#"{"chrome":{"transitionSecs":0.1}}"#).unwrap();
    assert_eq!(config.chrome.transition_secs, 0.1);
}

#[test]
fn drawer_mode_runs_edge_to_edge() {
    let config = WidgetConfig {
        is_drawer: true,
        offset: 20.0,
        top_offset: None,
        ..WidgetConfig::default()
    };
    assert_eq!(config.effective_margin(), 0.0);
    assert_eq!(config.panel_height(), "100%");
    let config = WidgetConfig {
        top_offset: Some(64.0),
        ..config
    };
    assert_eq!(config.panel_height(), "calc(100% - 64px)");
}

#[test]
fn floating_height_leaves_room_for_button() {
    let config = WidgetConfig {
        is_drawer: false,
        button_height: 70.0,
        offset: 20.0,
        widget_space: 20.0,
        top_offset: None,
        ..WidgetConfig::default()
    };
    assert_eq!(config.effective_margin(), 20.0);
    assert_eq!(
        config.panel_height(),
        "calc(100% - 70px - 20px - 20px - 20px)"
    );
}
