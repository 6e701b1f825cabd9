//! Prayer schedule resolution across an ordered chain of sources.
//!
//! Resolution never fails outward. The order is:
//!
//! 1. the manual override from settings, when enabled and complete;
//! 2. each configured [`SourceTier`] in turn;
//! 3. the hard-coded [`static_default_schedule`].
//!
//! Every step that does not produce a schedule is logged at `warn` and
//! resolution moves on. Each tier gets exactly one call, bounded by the
//! resolver's tier timeout.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::SourceFailure;
use crate::method::CalculationMethod;
use crate::prayer::{static_default_schedule, ManualTimes, Schedule};

/// Upper bound for a single tier call, on top of the HTTP client timeout.
pub const DEFAULT_TIER_TIMEOUT: Duration = Duration::from_secs(12);

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Where and when to compute a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name.
    pub timezone: String,
    pub date: NaiveDate,
}

/// The location-related slice of the settings document.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub calculation_method: CalculationMethod,
    pub imsak_offset: u32,
    pub use_manual_times: bool,
    pub manual_times: Option<ManualTimes>,
}

impl LocationConfig {
    pub fn query(&self, date: NaiveDate) -> LocationQuery {
        LocationQuery {
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
            date,
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// One upstream provider of prayer schedules.
///
/// Implementations normalize the provider's reply into a [`Schedule`] and
/// report any network, status, decode or ordering problem as a
/// [`SourceFailure`].
#[async_trait]
pub trait PrayerTimeSource: Send + Sync {
    /// Short provider name used in logs and the `source` field.
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        query: &LocationQuery,
        method: CalculationMethod,
    ) -> Result<Schedule, SourceFailure>;
}

/// Which calculation method a tier asks its source for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodPolicy {
    /// The method from settings.
    Configured,
    /// Always this method, regardless of settings.
    Fixed(CalculationMethod),
}

impl MethodPolicy {
    fn method(self, configured: CalculationMethod) -> CalculationMethod {
        match self {
            MethodPolicy::Configured => configured,
            MethodPolicy::Fixed(method) => method,
        }
    }
}

#[derive(Clone)]
pub struct SourceTier {
    pub source: Arc<dyn PrayerTimeSource>,
    pub method: MethodPolicy,
}

impl SourceTier {
    pub fn new(source: Arc<dyn PrayerTimeSource>, method: MethodPolicy) -> Self {
        Self { source, method }
    }
}

impl fmt::Debug for SourceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceTier")
            .field("source", &self.source.name())
            .field("method", &self.method)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Which step of the chain produced a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Manual,
    Upstream(&'static str),
    StaticDefault,
}

impl ScheduleSource {
    pub fn label(self) -> &'static str {
        match self {
            ScheduleSource::Manual => "manual",
            ScheduleSource::Upstream(name) => name,
            ScheduleSource::StaticDefault => "static_default",
        }
    }
}

impl Serialize for ScheduleSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchedule {
    pub schedule: Schedule,
    pub source: ScheduleSource,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScheduleResolver {
    tiers: Vec<SourceTier>,
    tier_timeout: Duration,
}

impl ScheduleResolver {
    pub fn new(tiers: Vec<SourceTier>) -> Self {
        Self {
            tiers,
            tier_timeout: DEFAULT_TIER_TIMEOUT,
        }
    }

    pub fn with_tier_timeout(mut self, tier_timeout: Duration) -> Self {
        self.tier_timeout = tier_timeout;
        self
    }

    pub fn tiers(&self) -> &[SourceTier] {
        &self.tiers
    }

    /// Longest a `resolve` call can wait on upstreams: every tier timing out.
    pub fn worst_case_latency(&self) -> Duration {
        self.tier_timeout * self.tiers.len() as u32
    }

    /// Produce the schedule for `date` at the configured location.
    pub async fn resolve(&self, config: &LocationConfig, date: NaiveDate) -> ResolvedSchedule {
        let offset = config.imsak_offset;

        if config.use_manual_times {
            match config.manual_times.as_ref() {
                Some(manual) => match manual.to_schedule(date, &config.timezone, offset) {
                    Ok(schedule) => {
                        tracing::info!(%date, "Using manual prayer times");
                        return ResolvedSchedule {
                            schedule,
                            source: ScheduleSource::Manual,
                        };
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Manual prayer times unusable, trying upstream sources");
                    }
                },
                None => {
                    tracing::warn!("Manual prayer times enabled but none saved, trying upstream sources");
                }
            }
        }

        let query = config.query(date);
        for tier in &self.tiers {
            let name = tier.source.name();
            let method = tier.method.method(config.calculation_method);

            let outcome = tokio::time::timeout(self.tier_timeout, tier.source.fetch(&query, method))
                .await
                .unwrap_or_else(|_| {
                    Err(SourceFailure::new(
                        name,
                        format!("no reply within {}s", self.tier_timeout.as_secs_f64()),
                    ))
                });

            match outcome {
                Ok(schedule) => {
                    tracing::info!(source = name, method = %method, %date, "Resolved prayer times");
                    return ResolvedSchedule {
                        schedule: schedule.with_imsak_offset(offset),
                        source: ScheduleSource::Upstream(name),
                    };
                }
                Err(e) => {
                    tracing::warn!(source = name, reason = %e.reason, "Prayer time source failed, falling back");
                }
            }
        }

        tracing::warn!(%date, "All prayer time sources failed, using static default schedule");
        ResolvedSchedule {
            schedule: static_default_schedule(date, &config.timezone, offset),
            source: ScheduleSource::StaticDefault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn upstream_schedule(fajr: NaiveTime) -> Schedule {
        Schedule {
            date: date(),
            timezone: "Asia/Jakarta".into(),
            imsak: t(3, 0),
            fajr,
            sunrise: t(5, 20),
            dhuhr: t(11, 30),
            asr: t(14, 50),
            maghrib: t(17, 35),
            isha: t(18, 45),
        }
    }

    enum Behaviour {
        Succeed(NaiveTime),
        Fail,
        Hang,
    }

    struct FakeSource {
        name: &'static str,
        behaviour: Behaviour,
        calls: AtomicUsize,
        methods: Mutex<Vec<CalculationMethod>>,
    }

    impl FakeSource {
        fn new(name: &'static str, behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                name,
                behaviour,
                calls: AtomicUsize::new(0),
                methods: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PrayerTimeSource for FakeSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(
            &self,
            _query: &LocationQuery,
            method: CalculationMethod,
        ) -> Result<Schedule, SourceFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.methods.lock().unwrap().push(method);
            match self.behaviour {
                Behaviour::Succeed(fajr) => Ok(upstream_schedule(fajr)),
                Behaviour::Fail => Err(SourceFailure::new(self.name, "status 503")),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(SourceFailure::new(self.name, "unreachable"))
                }
            }
        }
    }

    fn config() -> LocationConfig {
        LocationConfig {
            latitude: -7.98,
            longitude: 112.63,
            timezone: "Asia/Jakarta".into(),
            calculation_method: CalculationMethod::Kemenag,
            imsak_offset: 10,
            use_manual_times: false,
            manual_times: None,
        }
    }

    fn manual() -> ManualTimes {
        ManualTimes {
            fajr: Some("04:10".into()),
            sunrise: Some("05:25".into()),
            dhuhr: Some("11:35".into()),
            asr: Some("14:55".into()),
            maghrib: Some("17:40".into()),
            isha: Some("18:50".into()),
        }
    }

    fn resolver(tiers: Vec<SourceTier>) -> ScheduleResolver {
        ScheduleResolver::new(tiers)
    }

    #[tokio::test]
    async fn all_sources_failing_yields_static_default() {
        let primary = FakeSource::new("primary", Behaviour::Fail);
        let secondary = FakeSource::new("secondary", Behaviour::Fail);
        let resolver = resolver(vec![
            SourceTier::new(primary.clone(), MethodPolicy::Configured),
            SourceTier::new(secondary.clone(), MethodPolicy::Configured),
        ]);

        let resolved = resolver.resolve(&config(), date()).await;

        assert_eq!(resolved.source, ScheduleSource::StaticDefault);
        assert_eq!(resolved.schedule, static_default_schedule(date(), "Asia/Jakarta", 10));
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn empty_chain_yields_static_default() {
        let resolved = resolver(Vec::new()).resolve(&config(), date()).await;
        assert_eq!(resolved.source, ScheduleSource::StaticDefault);
    }

    #[tokio::test]
    async fn first_successful_tier_wins_and_later_tiers_are_not_called() {
        let primary = FakeSource::new("primary", Behaviour::Succeed(t(4, 15)));
        let secondary = FakeSource::new("secondary", Behaviour::Succeed(t(4, 25)));
        let resolver = resolver(vec![
            SourceTier::new(primary.clone(), MethodPolicy::Configured),
            SourceTier::new(secondary.clone(), MethodPolicy::Configured),
        ]);

        let resolved = resolver.resolve(&config(), date()).await;

        assert_eq!(resolved.source, ScheduleSource::Upstream("primary"));
        assert_eq!(resolved.schedule.fajr, t(4, 15));
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn falls_back_to_secondary_with_its_fixed_method() {
        let primary = FakeSource::new("primary", Behaviour::Fail);
        let secondary = FakeSource::new("secondary", Behaviour::Succeed(t(4, 25)));
        let resolver = resolver(vec![
            SourceTier::new(primary.clone(), MethodPolicy::Configured),
            SourceTier::new(secondary.clone(), MethodPolicy::Fixed(CalculationMethod::Mwl)),
        ]);

        let resolved = resolver.resolve(&config(), date()).await;

        assert_eq!(resolved.source, ScheduleSource::Upstream("secondary"));
        assert_eq!(*primary.methods.lock().unwrap(), vec![CalculationMethod::Kemenag]);
        assert_eq!(*secondary.methods.lock().unwrap(), vec![CalculationMethod::Mwl]);
    }

    #[tokio::test]
    async fn configured_offset_overrides_provider_imsak() {
        let primary = FakeSource::new("primary", Behaviour::Succeed(t(4, 15)));
        let resolver = resolver(vec![SourceTier::new(primary, MethodPolicy::Configured)]);

        let mut cfg = config();
        cfg.imsak_offset = 20;
        let resolved = resolver.resolve(&cfg, date()).await;

        assert_eq!(resolved.schedule.imsak, t(3, 55));
    }

    #[tokio::test]
    async fn manual_times_take_precedence_over_sources() {
        let primary = FakeSource::new("primary", Behaviour::Succeed(t(4, 15)));
        let resolver = resolver(vec![SourceTier::new(primary.clone(), MethodPolicy::Configured)]);

        let mut cfg = config();
        cfg.use_manual_times = true;
        cfg.manual_times = Some(manual());
        let resolved = resolver.resolve(&cfg, date()).await;

        assert_eq!(resolved.source, ScheduleSource::Manual);
        assert_eq!(resolved.schedule.fajr, t(4, 10));
        assert_eq!(resolved.schedule.imsak, t(4, 0));
        assert_eq!(primary.calls(), 0);
    }

    #[tokio::test]
    async fn manual_times_are_ignored_when_disabled() {
        let primary = FakeSource::new("primary", Behaviour::Succeed(t(4, 15)));
        let resolver = resolver(vec![SourceTier::new(primary, MethodPolicy::Configured)]);

        let mut cfg = config();
        cfg.manual_times = Some(manual());
        let resolved = resolver.resolve(&cfg, date()).await;

        assert_eq!(resolved.source, ScheduleSource::Upstream("primary"));
    }

    #[tokio::test]
    async fn unparsable_manual_entry_falls_through_to_sources() {
        let primary = FakeSource::new("primary", Behaviour::Succeed(t(4, 15)));
        let resolver = resolver(vec![SourceTier::new(primary.clone(), MethodPolicy::Configured)]);

        let mut broken = manual();
        broken.asr = Some("after lunch".into());
        let mut cfg = config();
        cfg.use_manual_times = true;
        cfg.manual_times = Some(broken);
        let resolved = resolver.resolve(&cfg, date()).await;

        assert_eq!(resolved.source, ScheduleSource::Upstream("primary"));
        assert_eq!(primary.calls(), 1);
    }

    #[tokio::test]
    async fn enabled_manual_without_times_falls_through() {
        let resolved = resolver(Vec::new())
            .resolve(
                &LocationConfig {
                    use_manual_times: true,
                    ..config()
                },
                date(),
            )
            .await;
        assert_eq!(resolved.source, ScheduleSource::StaticDefault);
    }

    #[tokio::test]
    async fn hanging_source_times_out_and_counts_as_failure() {
        let primary = FakeSource::new("primary", Behaviour::Hang);
        let secondary = FakeSource::new("secondary", Behaviour::Succeed(t(4, 25)));
        let resolver = resolver(vec![
            SourceTier::new(primary.clone(), MethodPolicy::Configured),
            SourceTier::new(secondary, MethodPolicy::Configured),
        ])
        .with_tier_timeout(Duration::from_millis(50));

        let resolved = resolver.resolve(&config(), date()).await;

        assert_eq!(resolved.source, ScheduleSource::Upstream("secondary"));
        assert_eq!(primary.calls(), 1);
    }

    #[test]
    fn worst_case_latency_covers_every_tier() {
        let resolver = resolver(vec![
            SourceTier::new(FakeSource::new("primary", Behaviour::Hang), MethodPolicy::Configured),
            SourceTier::new(FakeSource::new("secondary", Behaviour::Hang), MethodPolicy::Configured),
        ])
        .with_tier_timeout(Duration::from_secs(12));

        assert_eq!(resolver.worst_case_latency(), Duration::from_secs(24));
        assert_eq!(ScheduleResolver::new(Vec::new()).worst_case_latency(), Duration::ZERO);
    }

    #[test]
    fn source_labels() {
        assert_eq!(ScheduleSource::Manual.label(), "manual");
        assert_eq!(ScheduleSource::Upstream("aladhan").label(), "aladhan");
        assert_eq!(ScheduleSource::StaticDefault.label(), "static_default");
    }
}
