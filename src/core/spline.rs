//! Die zentrale Spline-Datenstruktur: Kontrollpunkt-Kette, Gelenk-Modi,
//! Closed-Loop und Arc-Length-Cache.
//!
//! Segment `k` besitzt die Punkte `3k..=3k+3`, Punkt `3k` ist gleichzeitig
//! der letzte Punkt von Segment `k-1`. Pro Gelenk (inkl. Kurvenenden) gibt es
//! einen [`JointMode`].

use super::arc_length::ArcLengthTable;
use super::bezier::SegmentPoints;
use super::joint::{is_joint_point, joint_of_point, JointMode};
use super::transform::LocalToWorld;
use crate::shared::options::MAX_EVEN_SAMPLES;
use crate::shared::SplineOptions;
use anyhow::{bail, Context};
use glam::{Affine3A, Vec3};

mod continuity;


/// Verkettete kubische Bézier-Kurve mit Stetigkeits-Modi an den Gelenken.
#[derive(Debug, Clone)]
pub struct BezierSpline<T: LocalToWorld = Affine3A> {
    /// Kontrollpunkte, Länge `3·segment_count + 1`
    points: Vec<Vec3>,
    /// Ein Modus pro Gelenk, Länge `segment_count + 1`
    modes: Vec<JointMode>,
    /// Letzter Punkt/Modus ist mit dem ersten identisch
    closed_loop: bool,
    /// Injizierte Lokal→Welt-Transformation
    transform: T,
    /// Konfiguration (Abtastrate, Standard-Layout)
    options: SplineOptions,
    /// Lazy Arc-Length-Tabelle; `None` = veraltet
    arc_lengths: Option<ArcLengthTable>,
}

impl BezierSpline<Affine3A> {
    /// Erstellt die Standard-Spline mit Identitäts-Transformation.
    pub fn new() -> Self {
        Self::with_options(SplineOptions::default(), Affine3A::IDENTITY)
    }
}

impl Default for BezierSpline<Affine3A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LocalToWorld> BezierSpline<T> {
    /// Erstellt die Standard-Spline (1 Segment, 2× Free, offen).
    pub fn with_transform(transform: T) -> Self {
        Self::with_options(SplineOptions::default(), transform)
    }

    /// Erstellt die Standard-Spline mit eigener Konfiguration.
    pub fn with_options(options: SplineOptions, transform: T) -> Self {
        let mut spline = Self {
            points: Vec::new(),
            modes: Vec::new(),
            closed_loop: false,
            transform,
            options,
            arc_lengths: None,
        };
        spline.reset();
        spline
    }

    /// Erstellt eine offene Spline aus einer vorhandenen Kontrollpunkt-Kette.
    ///
    /// Alle Gelenke starten als [`JointMode::Free`].
    pub fn from_control_points(
        points: Vec<Vec3>,
        options: SplineOptions,
        transform: T,
    ) -> anyhow::Result<Self> {
        if points.len() < 4 || (points.len() - 1) % 3 != 0 {
            bail!(
                "Ungültige Kontrollpunkt-Anzahl {}: erwartet 3·n + 1 mit n ≥ 1",
                points.len()
            );
        }
        let modes = vec![JointMode::Free; (points.len() - 1) / 3 + 1];
        Ok(Self {
            points,
            modes,
            closed_loop: false,
            transform,
            options,
            arc_lengths: None,
        })
    }

    /// Setzt auf das kanonische Start-Layout zurück.
    ///
    /// 4 kollineare Punkte bei `axis·spacing·k` (k = 1..=4), Modi [Free, Free].
    pub fn reset(&mut self) {
        let step = self.options.default_axis * self.options.default_point_spacing;
        self.points = (1..=4).map(|k| step * k as f32).collect();
        self.modes = vec![JointMode::Free; 2];
        self.closed_loop = false;
        self.invalidate_arc_lengths();
    }

    // ── Zugriff ─────────────────────────────────────────────────────

    /// Anzahl der Segmente.
    pub fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    /// Anzahl der Kontrollpunkte (`3·segment_count + 1`).
    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    /// Alle Kontrollpunkte im Kurvenraum.
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Kontrollpunkt im Kurvenraum, `None` bei ungültigem Index.
    pub fn control_point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Alle Gelenk-Modi (ein Eintrag pro Gelenk).
    pub fn joint_modes(&self) -> &[JointMode] {
        &self.modes
    }

    /// Modus des Gelenks, das dem Kontrollpunkt `index` am nächsten liegt.
    pub fn joint_mode_at(&self, index: usize) -> Option<JointMode> {
        if index >= self.points.len() {
            return None;
        }
        self.modes.get(joint_of_point(index)).copied()
    }

    /// Die vier Kontrollpunkte von Segment `segment`.
    pub fn segment(&self, segment: usize) -> anyhow::Result<SegmentPoints> {
        if segment >= self.segment_count() {
            bail!(
                "Segment {} existiert nicht (Spline hat {} Segmente)",
                segment,
                self.segment_count()
            );
        }
        let start = segment * 3;
        Ok(SegmentPoints::from_slice(&self.points[start..start + 4]))
    }

    /// True wenn die Spline geschlossen ist.
    pub fn is_closed_loop(&self) -> bool {
        self.closed_loop
    }

    /// Aktuelle Konfiguration.
    pub fn options(&self) -> &SplineOptions {
        &self.options
    }

    /// Injizierte Lokal→Welt-Transformation.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Ersetzt die Transformation.
    ///
    /// Die Arc-Length-Tabelle bleibt gültig, sie liegt im Kurvenraum.
    pub fn set_transform(&mut self, transform: T) {
        self.transform = transform;
    }

    // ── Abfragen nach Parameter t ───────────────────────────────────

    /// Segment-Index und lokales t für den Gesamtparameter `t`.
    ///
    /// Offen: `t` wird auf [0, 1] begrenzt. Closed-Loop: `t` läuft modulo 1 um.
    fn locate(&self, t: f32) -> (usize, f32) {
        let segment_count = self.segment_count();
        let t = if self.closed_loop {
            t.rem_euclid(1.0)
        } else {
            t.max(0.0)
        };
        if t >= 1.0 {
            return (segment_count - 1, 1.0);
        }
        let scaled = t * segment_count as f32;
        let index = (scaled as usize).min(segment_count - 1);
        (index, scaled - index as f32)
    }

    fn located_segment(&self, t: f32) -> (SegmentPoints, f32) {
        let (index, local_t) = self.locate(t);
        let start = index * 3;
        (
            SegmentPoints::from_slice(&self.points[start..start + 4]),
            local_t,
        )
    }

    /// Weltposition bei Gesamtparameter `t`.
    pub fn point(&self, t: f32) -> Vec3 {
        let (segment, local_t) = self.located_segment(t);
        self.transform.transform_point(segment.position(local_t))
    }

    /// Welt-Ableitung (nicht normalisiert) bei Gesamtparameter `t`.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let (segment, local_t) = self.located_segment(t);
        self.transform.transform_vector(segment.tangent(local_t))
    }

    /// Geschwindigkeit entlang der Kurve, identisch mit [`Self::tangent`].
    pub fn velocity(&self, t: f32) -> Vec3 {
        self.tangent(t)
    }

    /// Normalisierte Welt-Richtung bei Gesamtparameter `t`.
    pub fn direction(&self, t: f32) -> Vec3 {
        self.tangent(t).normalize_or_zero()
    }

    // ── Abfragen nach Distanz ───────────────────────────────────────

    /// True wenn die Arc-Length-Tabelle aktuell ist.
    pub fn is_arc_length_cache_valid(&self) -> bool {
        self.arc_lengths.is_some()
    }

    /// Markiert die Arc-Length-Tabelle als veraltet.
    pub(crate) fn invalidate_arc_lengths(&mut self) {
        if self.arc_lengths.take().is_some() {
            log::trace!("Arc-Length-Tabelle invalidiert");
        }
    }

    /// Arc-Length-Tabelle, wird bei Bedarf neu aufgebaut.
    pub fn arc_length_table(&mut self) -> &ArcLengthTable {
        let points = &self.points;
        let resolution = self.options.arc_length_resolution;
        self.arc_lengths.get_or_insert_with(|| {
            let table = ArcLengthTable::from_control_points(points, resolution);
            log::debug!(
                "Arc-Length-Tabelle neu aufgebaut: {} Einträge, Länge {:.3}",
                table.len(),
                table.total_length()
            );
            table
        })
    }

    /// Gesamtlänge der Kurve im Kurvenraum.
    pub fn total_length(&mut self) -> f32 {
        self.arc_length_table().total_length()
    }

    /// Weltposition nach zurückgelegter Distanz `distance` ab Kurvenstart.
    ///
    /// Closed-Loop: Distanz läuft modulo Gesamtlänge um. Offen: vor dem Start
    /// und hinter dem Ende wird entlang der End-Tangente linear extrapoliert.
    pub fn point_at_distance(&mut self, distance: f32) -> Vec3 {
        let total = self.total_length();
        let distance = if self.closed_loop {
            if total > 0.0 {
                distance.rem_euclid(total)
            } else {
                0.0
            }
        } else {
            distance
        };

        if distance < 0.0 {
            return self.point(0.0) + self.direction(0.0) * distance;
        }
        if distance > total {
            return self.point(1.0) + self.direction(1.0) * (distance - total);
        }
        let local = self.arc_length_table().point_at(distance);
        self.transform.transform_point(local)
    }

    /// Weltpunkte in gleichem Bogenlängen-Abstand `spacing`.
    ///
    /// Erster und letzter Punkt sind die Kurvenenden. Bei ungültigem
    /// `spacing` (≤ 0, nicht endlich) nur Start und Ende. Fehler, wenn mehr
    /// als [`MAX_EVEN_SAMPLES`] Abschnitte entstehen würden.
    pub fn sample_evenly(&mut self, spacing: f32) -> anyhow::Result<Vec<Vec3>> {
        let total = self.total_length();
        let start = self.point(0.0);
        let end = self.point(1.0);
        if !spacing.is_finite() || spacing <= 0.0 || total < f32::EPSILON {
            return Ok(vec![start, end]);
        }

        let sections = (total / spacing).ceil().max(1.0);
        if sections > MAX_EVEN_SAMPLES as f32 {
            bail!(
                "Abstand {} ergibt {:.0} Abschnitte bei Länge {:.3} (max. {})",
                spacing,
                sections,
                total,
                MAX_EVEN_SAMPLES
            );
        }
        let count = sections as usize;
        let step = total / count as f32;
        let mut result = Vec::with_capacity(count + 1);
        result.push(start);
        for i in 1..count {
            let local = self.arc_length_table().point_at(step * i as f32);
            result.push(self.transform.transform_point(local));
        }
        // Endpunkt immer exakt übernehmen
        result.push(end);
        Ok(result)
    }

    // ── Strukturelle Änderungen ─────────────────────────────────────

    /// Hängt ein Segment an das Kurvenende an.
    ///
    /// Die drei neuen Punkte liegen als Platzhalter in festen Abständen entlang
    /// der Standard-Achse. Der neue End-Modus übernimmt den bisherigen.
    pub fn add_segment(&mut self) {
        let start = self.points[self.points.len() - 1];
        let step = self.options.default_axis * self.options.default_point_spacing;
        self.points.extend((1..=3).map(|k| start + step * k as f32));

        let last_mode = self.modes[self.modes.len() - 1];
        self.modes.push(last_mode);
        let shared_joint_handle = self.points.len() - 4;
        self.enforce_mode(shared_joint_handle);

        if self.closed_loop {
            self.close_ring();
        }
        self.invalidate_arc_lengths();
        log::debug!("Segment angehängt, jetzt {} Segmente", self.segment_count());
    }

    /// Entfernt das letzte Segment.
    ///
    /// Gibt `false` zurück (No-op), wenn nur noch ein Segment existiert.
    pub fn remove_segment(&mut self) -> bool {
        if self.segment_count() <= 1 {
            log::debug!("Letztes Segment wird nicht entfernt");
            return false;
        }
        self.points.truncate(self.points.len() - 3);
        self.modes.pop();

        if self.closed_loop {
            self.close_ring();
        }
        self.invalidate_arc_lengths();
        log::debug!("Segment entfernt, jetzt {} Segmente", self.segment_count());
        true
    }

    /// Schließt oder öffnet die Spline.
    ///
    /// Beim Schließen übernimmt das letzte Gelenk den Modus von Gelenk 0 und
    /// der Endpunkt wird auf Punkt 0 gezogen.
    pub fn set_closed_loop(&mut self, closed_loop: bool) {
        self.closed_loop = closed_loop;
        if closed_loop {
            let last = self.modes.len() - 1;
            self.modes[last] = self.modes[0];
            self.move_control_point(0, self.points[0]);
        }
        self.invalidate_arc_lengths();
        log::debug!("Closed-Loop: {}", closed_loop);
    }

    /// Verschiebt den Kontrollpunkt `index`.
    ///
    /// Gelenkpunkte nehmen ihre beiden Handles starr mit (im Closed-Loop auch
    /// über die Ring-Grenze). Danach wird das betroffene Gelenk neu erzwungen.
    pub fn set_control_point(&mut self, index: usize, point: Vec3) -> anyhow::Result<()> {
        self.check_index(index)
            .context("Kontrollpunkt kann nicht gesetzt werden")?;
        self.move_control_point(index, point);
        self.invalidate_arc_lengths();
        log::trace!("Kontrollpunkt {} → {:?}", index, point);
        Ok(())
    }

    /// Setzt den Modus des Gelenks, das `index` am nächsten liegt.
    ///
    /// Im Closed-Loop werden die beiden End-Gelenke gemeinsam gesetzt.
    pub fn set_joint_mode(&mut self, index: usize, mode: JointMode) -> anyhow::Result<()> {
        self.check_index(index)
            .context("Gelenk-Modus kann nicht gesetzt werden")?;
        let joint = joint_of_point(index);
        let last = self.modes.len() - 1;
        self.modes[joint] = mode;
        if self.closed_loop {
            if joint == 0 {
                self.modes[last] = mode;
            } else if joint == last {
                self.modes[0] = mode;
            }
        }
        self.enforce_mode(index);
        self.invalidate_arc_lengths();
        log::trace!("Gelenk {} → {:?}", joint, mode);
        Ok(())
    }

    fn check_index(&self, index: usize) -> anyhow::Result<()> {
        if index >= self.points.len() {
            bail!(
                "Kontrollpunkt-Index {} außerhalb 0..{}",
                index,
                self.points.len()
            );
        }
        Ok(())
    }

    /// Verschiebung ohne Index-Prüfung und ohne Cache-Invalidierung.
    fn move_control_point(&mut self, index: usize, point: Vec3) {
        let last = self.points.len() - 1;
        if is_joint_point(index) {
            let delta = point - self.points[index];
            if self.closed_loop && (index == 0 || index == last) {
                // Gelenk 0 und letztes Gelenk sind derselbe Punkt
                self.points[1] += delta;
                self.points[last - 1] += delta;
                self.points[0] = point;
                self.points[last] = point;
            } else {
                if index > 0 {
                    self.points[index - 1] += delta;
                }
                if index < last {
                    self.points[index + 1] += delta;
                }
            }
        }
        self.points[index] = point;
        self.enforce_mode(index);
    }

    /// Stellt `points[last] == points[0]` und `modes[last] == modes[0]` her.
    fn close_ring(&mut self) {
        let last_point = self.points.len() - 1;
        let last_mode = self.modes.len() - 1;
        self.points[last_point] = self.points[0];
        self.modes[last_mode] = self.modes[0];
        self.enforce_mode(0);
    }
}
