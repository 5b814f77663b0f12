use crate::entitys::user_entity::UserInfoEntity;
use common::config::SessionConfig;
use common::util::common_utils::build_id;
use hmac::digest::Key;
use hmac::{Hmac, Mac};
use log::{debug, warn};
use moka::sync::Cache;
use sha2::{Digest, Sha256};
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// 签名链接携带签名的查询参数名
pub const SIGNATURE_PARAM: &str = "sig";

#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: String,
    pub email: String,
}

/// 登录会话，空闲超时自动失效
///
/// 同时负责删除链接的签名：签名绑定路径和会话 token，退出登录后旧链接即失效。
pub struct SessionService {
    cache: Cache<String, LoginSession>,
    url_mac: HmacSha256,
}

impl SessionService {
    pub fn new(config: &SessionConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(Duration::from_secs(config.ttl_secs))
            .build();
        let secret = match &config.url_secret {
            Some(secret) => secret.clone(),
            None => {
                warn!("session.url_secret not set, signed links will not survive a restart");
                format!("{}{}", build_id(), build_id())
            }
        };
        let key = Sha256::digest(secret.as_bytes());
        let url_mac = <HmacSha256 as Mac>::new(Key::<HmacSha256>::from_slice(&pad_key(&key)));
        Self { cache, url_mac }
    }

    pub fn create(&self, user: &UserInfoEntity) -> LoginSession {
        let session = LoginSession { token: build_id(), email: user.email.clone() };
        self.cache.insert(session.token.clone(), session.clone());
        debug!("session opened for {}", session.email);
        session
    }

    /// 当前身份（邮箱），未登录或已过期为 `None`
    pub fn current_identity(&self, token: &str) -> Option<String> {
        self.cache.get(token).map(|s| s.email)
    }

    pub fn remove(&self, token: &str) {
        self.cache.invalidate(token);
    }

    fn path_mac(&self, path: &str, token: &str) -> HmacSha256 {
        let mut mac = self.url_mac.clone();
        mac.update(token.as_bytes());
        mac.update(b"\n");
        mac.update(path.as_bytes());
        mac
    }

    /// `path?sig=...`，只对签发它的会话有效
    pub fn signed_url(&self, path: &str, token: &str) -> String {
        let sig = hex::encode(self.path_mac(path, token).finalize().into_bytes());
        format!("{}?{}={}", path, SIGNATURE_PARAM, sig)
    }

    pub fn verify_signature(&self, path: &str, token: &str, sig: &str) -> bool {
        match hex::decode(sig) {
            Ok(bytes) => self.path_mac(path, token).verify_slice(&bytes).is_ok(),
            Err(_) => false,
        }
    }
}

/// HMAC 密钥按块长补零
fn pad_key(key: &[u8]) -> [u8; 64] {
    let mut padded = [0u8; 64];
    padded[..key.len()].copy_from_slice(key);
    padded
}
