//! Best-effort environment probe: CPU identification and cache topology,
//! recorded alongside benchmark results so a throughput number can later be
//! read in context. Every field degrades to a placeholder rather than
//! failing the run — a probe gap shouldn't discard an otherwise-valid
//! throughput measurement.

use raw_cpuid::{CacheType, CpuId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    pub size_bytes: u64,
    pub associativity: u32,
    pub line_size_bytes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuInfo {
    pub vendor: String,
    pub uarch: String,
    pub cores_per_socket: u32,
    pub page_size_bytes: u64,
    pub l1i_cache: CacheInfo,
    pub l1d_cache: CacheInfo,
    pub l2_cache: CacheInfo,
    pub l3_cache: CacheInfo,
}

impl CpuInfo {
    /// Probes the running CPU. Never fails: any unsupported leaf degrades
    /// to a placeholder value and is logged at `warn` level.
    #[must_use]
    pub fn probe() -> Self {
        let cpuid = CpuId::new();

        let vendor = cpuid.get_vendor_info().map_or_else(
            || {
                log::warn!("cpuid vendor leaf unavailable, recording \"unknown\"");
                "unknown".to_string()
            },
            |v| v.as_str().to_string(),
        );

        let feature_info = cpuid.get_feature_info();

        let uarch = cpuid
            .get_processor_brand_string()
            .map(|b| b.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                feature_info
                    .as_ref()
                    .map(|f| format!("family-{}-model-{}", f.family_id(), f.model_id()))
            })
            .unwrap_or_else(|| {
                log::warn!("cpuid brand string and family/model both unavailable, recording \"unknown\"");
                "unknown".to_string()
            });

        let mut l1i_cache = CacheInfo::default();
        let mut l1d_cache = CacheInfo::default();
        let mut l2_cache = CacheInfo::default();
        let mut l3_cache = CacheInfo::default();
        let mut max_cores_for_cache = None;

        match cpuid.get_cache_parameters() {
            Some(params) => {
                for cache in params {
                    let info = CacheInfo {
                        size_bytes: (cache.associativity()
                            * cache.physical_line_partitions()
                            * cache.coherency_line_size()
                            * cache.sets()) as u64,
                        associativity: cache.associativity() as u32,
                        line_size_bytes: cache.coherency_line_size() as u32,
                    };

                    match (cache.level(), cache.cache_type()) {
                        (1, CacheType::Instruction) => l1i_cache = info,
                        (1, CacheType::Data) => l1d_cache = info,
                        (2, _) => l2_cache = info,
                        (3, _) => l3_cache = info,
                        _ => {}
                    }

                    if matches!(cache.cache_type(), CacheType::Unified) || cache.level() == 3 {
                        max_cores_for_cache = Some(cache.max_cores_for_cache() as u32);
                    }
                }
            }
            None => {
                log::warn!("cpuid deterministic cache leaf unavailable, recording zeroed cache info");
            }
        }

        let cores_per_socket = max_cores_for_cache
            .or_else(|| {
                feature_info
                    .as_ref()
                    .map(|f| f.max_logical_processor_ids() as u32)
            })
            .filter(|&n| n > 0)
            .unwrap_or_else(|| {
                log::warn!("cpuid core count unavailable, recording 0");
                0
            });

        Self {
            vendor,
            uarch,
            cores_per_socket,
            page_size_bytes: page_size::get() as u64,
            l1i_cache,
            l1d_cache,
            l2_cache,
            l3_cache,
        }
    }
}
