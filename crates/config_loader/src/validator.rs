//! 配置校验模块
//!
//! 校验规则：
//! - tolerance_s > 0
//! - grace_period_s >= 0
//! - min_catch_up_s > 0
//! - 加速档位表合法（首项为 1，严格递增，全部为正）
//!
//! 基准时间无效不视为错误，只产生警告（引擎视为未配置）。

use contracts::ContractError;

use crate::{BaseTimeSetting, RealtimeConfig};

/// 校验 RealtimeConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &RealtimeConfig) -> Result<(), ContractError> {
    validate_engine(config)?;
    validate_warp(config)?;
    Ok(())
}

/// 收集非致命问题
pub fn collect_warnings(config: &RealtimeConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    match &config.base_time {
        BaseTimeSetting::Unset => {
            warnings.push("base_time is not set - synchronization will stay inactive".to_string())
        }
        BaseTimeSetting::Invalid(raw) => warnings.push(format!(
            "base_time '{raw}' is not a valid ISO-8601 instant - treated as unset"
        )),
        BaseTimeSetting::At(_) => {}
    }

    if config.warp.rates.len() < 2 {
        warnings.push("warp.rates has no rate above 1x - catching up is disabled".to_string());
    }

    warnings
}

/// 校验引擎参数
fn validate_engine(config: &RealtimeConfig) -> Result<(), ContractError> {
    let engine = &config.engine;

    if engine.tolerance_s.is_nan() || engine.tolerance_s <= 0.0 {
        return Err(ContractError::config_validation(
            "engine.tolerance_s",
            format!("tolerance_s must be > 0, got {}", engine.tolerance_s),
        ));
    }

    if engine.grace_period_s.is_nan() || engine.grace_period_s < 0.0 {
        return Err(ContractError::config_validation(
            "engine.grace_period_s",
            format!("grace_period_s must be >= 0, got {}", engine.grace_period_s),
        ));
    }

    if engine.min_catch_up_s.is_nan() || engine.min_catch_up_s <= 0.0 {
        return Err(ContractError::config_validation(
            "engine.min_catch_up_s",
            format!("min_catch_up_s must be > 0, got {}", engine.min_catch_up_s),
        ));
    }

    Ok(())
}

/// 校验加速档位表
fn validate_warp(config: &RealtimeConfig) -> Result<(), ContractError> {
    config
        .warp
        .table()
        .map(|_| ())
        .map_err(|e| ContractError::config_validation("warp.rates", e.to_string()))
}
