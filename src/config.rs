// src/config.rs

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{LeadRepository, LeadStore, UserRepository, UserStore},
    services::{AuthService, LeadService},
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;
const DEFAULT_WHATSAPP_COUNTRY_CODE: &str = "972";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub whatsapp_country_code: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lê a configuração de qualquer fonte chave -> valor (o ambiente, em produção).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} deve ser definida"))
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let acquire_timeout_secs = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("DB_ACQUIRE_TIMEOUT_SECS inválido: {raw}"))?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        let whatsapp_country_code = lookup("WHATSAPP_COUNTRY_CODE")
            .map(|v| v.trim().trim_start_matches('+').to_string())
            .unwrap_or_else(|| DEFAULT_WHATSAPP_COUNTRY_CODE.to_string());
        if whatsapp_country_code.is_empty()
            || !whatsapp_country_code.chars().all(|c| c.is_ascii_digit())
        {
            anyhow::bail!("WHATSAPP_COUNTRY_CODE inválido: {whatsapp_country_code}");
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            whatsapp_country_code,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub lead_service: LeadService,
}

impl AppState {
    pub async fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        // --- Monta o gráfico de dependências ---
        let leads: Arc<dyn LeadStore> = Arc::new(LeadRepository::new(db_pool.clone()));
        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db_pool));

        Ok(Self::from_parts(
            settings.jwt_secret.clone(),
            leads,
            users,
            settings.whatsapp_country_code.clone(),
        ))
    }

    pub fn from_parts(
        jwt_secret: String,
        leads: Arc<dyn LeadStore>,
        users: Arc<dyn UserStore>,
        whatsapp_country_code: String,
    ) -> Self {
        Self {
            auth_service: AuthService::new(users.clone(), jwt_secret),
            lead_service: LeadService::new(leads, users, whatsapp_country_code),
        }
    }
}
