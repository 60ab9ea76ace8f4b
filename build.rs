use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Sin estas dos claves la app arranca pero no puede hablar con Supabase
const REQUIRED_KEYS: [&str; 2] = ["SUPABASE_URL", "SUPABASE_KEY"];

fn parse_dotenv(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().trim_matches('"').to_string()))
        .collect()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-changed=.env.example");

    let env_file = Path::new(".env");
    let vars = match fs::read_to_string(env_file) {
        Ok(contents) => parse_dotenv(&contents),
        Err(_) => {
            println!("cargo:warning=No .env file found. Copia .env.example a .env y configura Supabase.");
            HashMap::new()
        }
    };

    // El entorno del proceso tiene prioridad sobre el .env
    for (key, value) in &vars {
        if env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }

    for key in REQUIRED_KEYS {
        if env::var(key).is_err() && !vars.contains_key(key) {
            println!("cargo:warning={} no definido: el dashboard no podrá cargar pedidos", key);
        }
    }
}
