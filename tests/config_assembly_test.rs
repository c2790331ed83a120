use flowdose::config::commerce::{ModuleKey, ModuleOptions, ProviderOptions};
use flowdose::{assemble, EnvSnapshot};

fn env(vars: &[(&str, &str)]) -> EnvSnapshot {
    EnvSnapshot::from_vars(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())))
}

fn keys(vars: &[(&str, &str)]) -> Vec<ModuleKey> {
    assemble(&env(vars)).modules.iter().map(|m| m.key).collect()
}

#[test]
fn test_bare_environment_yields_only_file_module() {
    let config = assemble(&env(&[]));

    assert_eq!(config.modules.len(), 1);
    let json = serde_json::to_value(&config).unwrap();
    let file = &json["modules"][0];
    assert_eq!(file["key"], "file");
    assert_eq!(file["resolve"], "@medusajs/file");

    let provider = &file["options"]["providers"][0];
    assert_eq!(provider["resolve"], "@medusajs/file-local");
    assert_eq!(provider["id"], "local");
    assert_eq!(provider["options"]["upload_dir"], "static");
    assert!(provider["options"]["backend_url"].is_null());
    assert!(json["plugins"].as_array().unwrap().is_empty());
}

#[test]
fn test_event_bus_present_iff_redis_url() {
    let combos: [&[(&str, &str)]; 4] = [
        &[],
        &[("BACKEND_URL", "https://api.flowdose.xyz")],
        &[("RESEND_API_KEY", "re_123"), ("RESEND_FROM_EMAIL", "noreply@flowdose.xyz")],
        &[("REDIS_URL", "")],
    ];
    for vars in combos {
        assert!(!keys(vars).contains(&ModuleKey::EventBus), "{:?}", vars);
    }

    let config = assemble(&env(&[("REDIS_URL", "redis://cache:6379")]));
    let buses: Vec<_> = config
        .modules
        .iter()
        .filter(|m| m.key == ModuleKey::EventBus)
        .collect();
    assert_eq!(buses.len(), 1);
    assert_eq!(buses[0].resolve, "@medusajs/event-bus-redis");
    assert_eq!(
        buses[0].options,
        ModuleOptions::EventBus {
            redis_url: "redis://cache:6379".to_string()
        }
    );
    assert_eq!(config.project_config.redis_url.as_deref(), Some("redis://cache:6379"));
}

#[test]
fn test_notification_requires_key_and_sender() {
    assert!(!keys(&[("RESEND_API_KEY", "re_123")]).contains(&ModuleKey::Notification));
    assert!(!keys(&[("RESEND_FROM_EMAIL", "noreply@flowdose.xyz")]).contains(&ModuleKey::Notification));
    assert!(!keys(&[("RESEND_API_KEY", "re_123"), ("RESEND_FROM_EMAIL", "")])
        .contains(&ModuleKey::Notification));
    // RESEND_FROM only feeds the CLI, not the framework provider
    assert!(!keys(&[("RESEND_API_KEY", "re_123"), ("RESEND_FROM", "noreply@flowdose.xyz")])
        .contains(&ModuleKey::Notification));

    let config = assemble(&env(&[
        ("RESEND_API_KEY", "re_123"),
        ("RESEND_FROM_EMAIL", "noreply@flowdose.xyz"),
    ]));
    let notification = config.module(ModuleKey::Notification).unwrap();
    assert_eq!(notification.resolve, "@medusajs/notification");

    let json = serde_json::to_value(notification).unwrap();
    let provider = &json["options"]["providers"][0];
    assert_eq!(provider["id"], "resend");
    assert_eq!(provider["resolve"], "./src/modules/email-notifications");
    assert_eq!(provider["options"]["channels"], serde_json::json!(["email"]));
    assert_eq!(provider["options"]["api_key"], "re_123");
    assert_eq!(provider["options"]["from"], "noreply@flowdose.xyz");
}

#[test]
fn test_full_environment_order_and_passthrough() {
    let config = assemble(&env(&[
        ("DATABASE_URL", "postgres://medusa@db/medusa"),
        ("REDIS_URL", "redis://cache:6379"),
        ("ADMIN_CORS", "https://admin.flowdose.xyz"),
        ("AUTH_CORS", "https://admin.flowdose.xyz,https://flowdose.xyz"),
        ("STORE_CORS", "https://flowdose.xyz"),
        ("JWT_SECRET", "jwt"),
        ("COOKIE_SECRET", "cookie"),
        ("BACKEND_URL", "https://api.flowdose.xyz"),
        ("RESEND_API_KEY", "re_123"),
        ("RESEND_FROM_EMAIL", "noreply@flowdose.xyz"),
    ]));

    assert_eq!(
        config.modules.iter().map(|m| m.key).collect::<Vec<_>>(),
        vec![ModuleKey::File, ModuleKey::EventBus, ModuleKey::Notification]
    );

    let json = serde_json::to_value(&config).unwrap();
    let project = &json["projectConfig"];
    assert_eq!(project["databaseUrl"], "postgres://medusa@db/medusa");
    assert_eq!(project["databaseLogging"], false);
    assert_eq!(project["workerMode"], "background");
    assert_eq!(project["http"]["storeCors"], "https://flowdose.xyz");
    assert_eq!(project["http"]["jwtSecret"], "jwt");
    assert_eq!(project["http"]["cookieSecret"], "cookie");
    assert_eq!(json["admin"]["backendUrl"], "https://api.flowdose.xyz");

    match &config.modules[0].options {
        ModuleOptions::Providers { providers } => assert_eq!(
            providers[0].options,
            ProviderOptions::LocalFile {
                upload_dir: "static".to_string(),
                backend_url: Some("https://api.flowdose.xyz/static".to_string()),
            }
        ),
        other => panic!("unexpected file options: {:?}", other),
    }
}

#[test]
fn test_missing_required_values_pass_through_as_null() {
    let json = serde_json::to_value(assemble(&env(&[]))).unwrap();

    assert!(json["projectConfig"]["databaseUrl"].is_null());
    assert!(json["projectConfig"]["http"]["jwtSecret"].is_null());
    assert!(json["admin"]["backendUrl"].is_null());
}

#[test]
fn test_json_round_trips_through_config_type() {
    let config = assemble(&env(&[
        ("REDIS_URL", "redis://cache:6379"),
        ("RESEND_API_KEY", "re_123"),
        ("RESEND_FROM_EMAIL", "noreply@flowdose.xyz"),
    ]));
    let text = config.to_json_pretty().unwrap();
    let parsed: flowdose::CommerceConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
