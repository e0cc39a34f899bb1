//! Terminal rendering surface and notification sink.

use std::io::{self, Write};

use client_core::{Notification, Notifier, RenderModel};
use tracing::info;

pub struct TerminalSurface<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, model: &RenderModel) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, model)?;
            writeln!(self.out)?;
            return self.out.flush();
        }

        writeln!(self.out, "=== Busca de Academias ===")?;
        if !model.query.is_empty() {
            writeln!(self.out, "Busca: {}", model.query)?;
        }

        if let Some(map) = &model.map {
            writeln!(self.out, "Sua Localização")?;
            writeln!(self.out, "Latitude: {}", map.fix.coordinate.latitude)?;
            writeln!(self.out, "Longitude: {}", map.fix.coordinate.longitude)?;
            let visible = model
                .markers
                .iter()
                .filter(|marker| map.region.contains(marker.coordinate))
                .count();
            writeln!(
                self.out,
                "Mapa centrado em ({:.5}, {:.5}), {} marcadores ({visible} na região inicial):",
                map.region.center.latitude,
                map.region.center.longitude,
                model.markers.len()
            )?;
            for marker in &model.markers {
                match &marker.description {
                    Some(description) => writeln!(
                        self.out,
                        "  - {} ({description}) @ {:.5}, {:.5}",
                        marker.title, marker.coordinate.latitude, marker.coordinate.longitude
                    )?,
                    None => writeln!(
                        self.out,
                        "  * {} @ {:.5}, {:.5}",
                        marker.title, marker.coordinate.latitude, marker.coordinate.longitude
                    )?,
                }
            }
        }

        if model.searching {
            writeln!(self.out, "Buscando...")?;
        }
        if let Some(payload) = model.lookup.payload() {
            writeln!(self.out, "{}", payload.title)?;
            writeln!(self.out, "Ano: {}", payload.year)?;
            writeln!(self.out, "Gênero: {}", payload.genre)?;
            writeln!(self.out, "Diretor: {}", payload.director)?;
            writeln!(self.out, "Prêmios: {}", payload.awards)?;
        }

        self.out.flush()
    }
}

pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        info!(title = %notification.title, "showing notification");
        eprintln!("[{}] {}", notification.title, notification.message);
    }
}
