// src/services/auth.rs

// Os tokens são emitidos pelo serviço de autenticação externo (segredo
// compartilhado, HS256). Aqui só validamos e resolvemos o usuário no tenant.

use std::sync::Arc;

use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserStore,
    models::user::{Claims, User},
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt_secret: String) -> Self {
        Self { users, jwt_secret }
    }

    pub fn decode_claims(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        Ok(token_data.claims)
    }

    /// Valida o token e garante que o usuário pertence ao tenant pedido.
    pub async fn authenticate(&self, token: &str, tenant_id: Uuid) -> Result<User, AppError> {
        let claims = self.decode_claims(token)?;

        self.users
            .find_by_id(tenant_id, claims.sub)
            .await?
            .ok_or(AppError::NotTenantMember)
    }

    #[cfg(test)]
    pub fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        use jsonwebtoken::{encode, EncodingKey, Header};

        let now = chrono::Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| AppError::InternalServerError(e.into()))
    }
}
