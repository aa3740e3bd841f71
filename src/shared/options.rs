//! Zentrale Konfiguration für Splines.
//!
//! `SplineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use anyhow::{bail, Context};
use glam::Vec3;
use serde::{Deserialize, Serialize};

// ── Arc-Length ──────────────────────────────────────────────────────

/// Abtastschritte pro Segment beim Aufbau der Arc-Length-Tabelle.
pub const ARC_LENGTH_RESOLUTION: usize = 16;

// ── Gleichmäßige Abtastung ──────────────────────────────────────────

/// Obergrenze der Abschnitte bei `sample_evenly`.
pub const MAX_EVEN_SAMPLES: usize = 1 << 20;

// ── Standard-Layout ─────────────────────────────────────────────────

/// Abstand der Standard- und Platzhalter-Punkte in Kurvenraum-Einheiten.
pub const DEFAULT_POINT_SPACING: f32 = 1.0;
/// Achse, entlang der Standard- und Platzhalter-Punkte gelegt werden.
pub const DEFAULT_AXIS: Vec3 = Vec3::X;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Spline-Optionen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineOptions {
    /// Abtastschritte pro Segment (Arc-Length-Tabelle)
    pub arc_length_resolution: usize,
    /// Abstand der Standard-Punkte entlang `default_axis`
    pub default_point_spacing: f32,
    /// Achse für Standard-Layout und angehängte Platzhalter-Handles
    pub default_axis: Vec3,
}

impl Default for SplineOptions {
    fn default() -> Self {
        Self {
            arc_length_resolution: ARC_LENGTH_RESOLUTION,
            default_point_spacing: DEFAULT_POINT_SPACING,
            default_axis: DEFAULT_AXIS,
        }
    }
}

impl SplineOptions {
    /// Prüft die Werte und gibt die Optionen unverändert zurück.
    pub fn validated(self) -> anyhow::Result<Self> {
        if self.arc_length_resolution == 0 {
            bail!("arc_length_resolution muss mindestens 1 sein");
        }
        if !self.default_point_spacing.is_finite() || self.default_point_spacing <= 0.0 {
            bail!(
                "default_point_spacing muss endlich und > 0 sein (ist {})",
                self.default_point_spacing
            );
        }
        if !self.default_axis.is_finite() || self.default_axis.length_squared() == 0.0 {
            bail!("default_axis muss endlich und ungleich Null sein");
        }
        Ok(self)
    }

    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content)
                .map_err(anyhow::Error::from)
                .and_then(Self::validated)
            {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Optionen nicht schreibbar: {}", path.display()))?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }
}
