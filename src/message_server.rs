//! jablock aggregator server — newline-delimited JSON over stdin/stdout.
//!
//! Protocol: one JSON object per line.
//! Message:  {"action":"incrementBlocked","tabId":3}
//! Event:    {"event":"tabRemoved","tabId":3} | {"event":"sessionStart"}
//! Response: {"status":"..."} or {"count":n} or {"error":"..."}

use std::io::{self, BufRead, Write};
use std::time::Instant;

use jablock::app::App;
use jablock::managers::counter_aggregator::{CounterAggregatorTrait, TabId};
use jablock::types::message::Message;

use serde_json::{json, Value};

fn data_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("JABLOCK_DATA_DIR") {
        std::path::PathBuf::from(dir)
    } else if let Ok(exe) = std::env::current_exe() {
        exe.parent()
            .unwrap_or(std::path::Path::new("."))
            .to_path_buf()
    } else {
        std::path::PathBuf::from(".")
    }
}

fn main() {
    let dir = data_dir();
    let app = App::new(&dir.to_string_lossy()).expect("Failed to initialize jablock aggregator");

    // Signal ready
    let ready = json!({"event":"ready","version":env!("CARGO_PKG_VERSION")});
    println!("{}", ready);
    io::stdout().flush().unwrap();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                println!("{}", json!({"error": format!("parse error: {}", e)}));
                io::stdout().flush().unwrap();
                continue;
            }
        };

        let reply = dispatch(&app, &value);
        println!("{}", reply);
        io::stdout().flush().unwrap();

        // A long gap between lines must not strand a throttled write.
        if let Ok(mut agg) = app.aggregator.lock() {
            agg.persist_due(Instant::now());
        }
    }
}

fn dispatch(app: &App, value: &Value) -> Value {
    let tab_id = value
        .get("tabId")
        .and_then(|v| v.as_u64())
        .map(|v| v as TabId);

    if let Some(event) = value.get("event").and_then(|v| v.as_str()) {
        return match event {
            "tabRemoved" => match tab_id {
                Some(tab) => match app.handle_tab_removed(tab) {
                    Ok(()) => json!({"status":"removed"}),
                    Err(e) => json!({"error": e.to_string()}),
                },
                None => json!({"error":"missing tabId"}),
            },
            "sessionStart" => match app.handle_session_start() {
                Ok(()) => json!({"status":"started"}),
                Err(e) => json!({"error": e.to_string()}),
            },
            other => json!({"error": format!("unknown event: {}", other)}),
        };
    }

    let message: Message = match serde_json::from_value(value.clone()) {
        Ok(m) => m,
        Err(e) => return json!({"error": format!("unknown action: {}", e)}),
    };

    match app.handle_message(tab_id, &message) {
        Ok(response) => serde_json::to_value(response)
            .unwrap_or_else(|e| json!({"error": e.to_string()})),
        Err(e) => json!({"error": e.to_string()}),
    }
}
