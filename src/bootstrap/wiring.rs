//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (settings file, fetch store) / 创建 infra 层具体实现
//! - ✅ Seed the live settings view from the persisted settings / 用持久化设置初始化运行时设置
//! - ✅ Assemble the use cases into [`AppDeps`] / 组装用例
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! ❌ **No configuration validation / 禁止做配置验证**
//!
//! > **This is the only place allowed to depend on ip-infra + ip-platform + ip-app simultaneously.**
//! > **这是唯一允许同时依赖 ip-infra、ip-platform 和 ip-app 的地方。**

use std::sync::Arc;

use ip_app::{GetSettings, HandlerLifecycleManager, PlaceholderProtocol, SettingsCell, UpdateSettings};
use ip_core::config::AppConfig;
use ip_core::ports::{FetchStorePort, SettingsPort};
use ip_infra::{FileSettingsRepository, FsFetchStore};
use tokio::runtime::Handle;
use tracing::{debug, info_span, Instrument};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Settings repository initialization failed: {0}")]
    SettingsInit(String),

    #[error("Fetch store initialization failed: {0}")]
    FetchStoreInit(String),
}

/// Everything a front end needs, assembled once per session.
pub struct AppDeps {
    pub settings: SettingsCell,
    pub protocol: Arc<PlaceholderProtocol>,
    pub lifecycle: HandlerLifecycleManager,
    pub get_settings: GetSettings,
    pub update_settings: UpdateSettings,
}

/// Build the dependency graph for `config`; fetch tasks are spawned on `runtime`.
///
/// # Errors / 错误
///
/// - `WiringError::SettingsInit` if the persisted settings cannot be read
/// - `WiringError::FetchStoreInit` if the HTTP client cannot be built
pub async fn wire_dependencies(config: &AppConfig, runtime: Handle) -> WiringResult<AppDeps> {
    let span = info_span!(
        "bootstrap.wire_dependencies",
        document_root = %config.document_root.display(),
        settings_path = %config.settings_path.display(),
    );

    async {
        let settings_repo: Arc<dyn SettingsPort> =
            Arc::new(FileSettingsRepository::new(&config.settings_path));
        let persisted = settings_repo
            .load()
            .await
            .map_err(|e| WiringError::SettingsInit(format!("{e:#}")))?;
        let settings = SettingsCell::new(persisted.paste);

        let fetch_store: Arc<dyn FetchStorePort> = Arc::new(
            FsFetchStore::with_defaults(&config.document_root)
                .map_err(|e| WiringError::FetchStoreInit(format!("{e:#}")))?,
        );

        let protocol = Arc::new(PlaceholderProtocol::new(
            fetch_store,
            settings.clone(),
            runtime,
        ));
        let lifecycle = HandlerLifecycleManager::new(Arc::clone(&protocol), settings.clone());

        debug!("Dependencies wired");
        Ok(AppDeps {
            get_settings: GetSettings::new(Arc::clone(&settings_repo)),
            update_settings: UpdateSettings::new(settings_repo, settings.clone()),
            settings,
            protocol,
            lifecycle,
        })
    }
    .instrument(span)
    .await
}
