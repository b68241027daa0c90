// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn config_payload_uses_camel_case_keys() {
    let cfg = WorkerConfig {
        db: DbConfig {
            host: "postgres".into(),
            port: "5432".into(),
            name: "xingrin".into(),
            user: "xingrin".into(),
            password: "secret".into(),
        },
        redis_url: "redis://redis:6379/0".into(),
        paths: PathsConfig {
            results: "/app/results".into(),
            logs: "/app/logs".into(),
        },
        logging: LoggingConfig {
            level: "INFO".into(),
            enable_command_logging: true,
        },
        debug: false,
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"redisUrl\""));
    assert!(json.contains("\"enableCommandLogging\""));

    let back: WorkerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.db.host, "postgres");
    assert_eq!(back.paths.logs, "/app/logs");
}

#[test]
fn db_url_assembles_from_parts() {
    let db = DbConfig {
        host: "203.0.113.9".into(),
        port: "5432".into(),
        name: "xingrin".into(),
        user: "scan".into(),
        password: "pw".into(),
    };
    assert_eq!(db.url(), "postgres://scan:pw@203.0.113.9:5432/xingrin");
}
