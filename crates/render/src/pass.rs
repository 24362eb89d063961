use blockfield_geometry::GeometryLibrary;

use crate::backend::{BackendError, DrawBackend, FrameUniforms};
use crate::node::SceneNode;

/// Counters for one frame pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Nodes that rendered without error.
    pub nodes: usize,
    /// Draw calls issued by those nodes.
    pub draw_calls: usize,
    /// Nodes whose render returned an error.
    pub failed_nodes: usize,
}

/// One frame's worth of node submissions against a backend.
///
/// A node that fails to render is logged and counted; the pass carries on
/// with the next one.
pub struct FramePass<'a, B: DrawBackend + ?Sized> {
    library: &'a GeometryLibrary,
    backend: &'a mut B,
    stats: PassStats,
    span: tracing::Span,
}

impl<'a, B: DrawBackend + ?Sized> FramePass<'a, B> {
    /// Start a frame: hands the uniforms to the backend before any draw.
    pub fn begin(
        library: &'a GeometryLibrary,
        backend: &'a mut B,
        uniforms: &FrameUniforms,
    ) -> Result<Self, BackendError> {
        let span = tracing::debug_span!("frame_pass");
        {
            let _guard = span.enter();
            backend.begin_frame(uniforms)?;
        }
        Ok(Self {
            library,
            backend,
            stats: PassStats::default(),
            span,
        })
    }

    /// Render `node`. Returns whether it succeeded.
    pub fn draw(&mut self, node: &SceneNode) -> bool {
        let _guard = self.span.enter();
        match node.render(self.library, &mut *self.backend) {
            Ok(calls) => {
                self.stats.nodes += 1;
                self.stats.draw_calls += calls;
                true
            }
            Err(err) => {
                tracing::error!(solid = %node.solid(), %err, "node skipped");
                self.stats.failed_nodes += 1;
                false
            }
        }
    }

    pub fn finish(self) -> PassStats {
        let _guard = self.span.enter();
        tracing::debug!(
            nodes = self.stats.nodes,
            draw_calls = self.stats.draw_calls,
            failed = self.stats.failed_nodes,
            "frame pass finished"
        );
        self.stats
    }
}
