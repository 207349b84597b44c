use std::path::{Path, PathBuf};

use crate::{core::SimulationState, prelude::*};

/// JSON file keeping the simulation state between runs.
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the saved state, falling back to [`None`] when it is missing or unreadable.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn read(&self) -> Option<SimulationState> {
        self.read_fallibly().unwrap_or_else(|error| {
            error!(error = %format_args!("{error:#}"), "failed to load the state, starting over");
            None
        })
    }

    fn read_fallibly(&self) -> Result<Option<SimulationState>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let contents = std::fs::read(&self.path)?;
        let state = serde_json::from_slice(&contents)
            .with_context(|| format!("`{}` is not a valid state", self.path.display()))?;
        Ok(Some(state))
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn write(&self, state: &SimulationState) -> Result {
        let contents = serde_json::to_vec_pretty(state)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("failed to write `{}`", self.path.display()))?;
        debug!(n_steps = state.n_steps, "saved");
        Ok(())
    }

    /// Same as [`StateFile::write`] but only logs the failure.
    pub fn save(&self, state: &SimulationState) {
        if let Err(error) = self.write(state) {
            error!(error = %format_args!("{error:#}"), "failed to save the state");
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use batsim_quantities::energy::WattHours;
    use chrono::Local;

    use super::*;
    use crate::core::meter::MeterSnapshot;

    fn temp_file(name: &str) -> StateFile {
        let path = std::env::temp_dir().join(format!("batsim-{}-{name}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        StateFile::new(path)
    }

    #[test]
    fn missing_file_ok() {
        assert_eq!(temp_file("missing").read(), None);
    }

    #[test]
    fn invalid_file_falls_back() -> Result {
        let file = temp_file("invalid");
        std::fs::write(file.path(), "{not json")?;
        assert_eq!(file.read(), None);
        std::fs::remove_file(file.path())?;
        Ok(())
    }

    #[test]
    fn write_read_ok() -> Result {
        let file = temp_file("write-read");
        let mut state = SimulationState::new(WattHours::from(2500.0));
        state.last_snapshot = Some(
            MeterSnapshot::builder().usage_high(10).usage_low(20).return_high(30).return_low(40).build(),
        );
        state.last_event_time = Some(Local::now());
        state.n_steps = 3;
        file.write(&state)?;
        assert_eq!(file.read(), Some(state));
        std::fs::remove_file(file.path())?;
        Ok(())
    }

    #[test]
    fn older_state_without_totals_ok() -> Result {
        let file = temp_file("older");
        // language=json
        std::fs::write(
            file.path(),
            r#"{"last_snapshot": null, "last_event_time": null, "residual_energy": 1000.0}"#,
        )?;
        let Some(state) = file.read() else { bail!("the state should be readable") };
        assert_eq!(state, SimulationState::new(WattHours::from(1000.0)));
        Ok(())
    }
}
