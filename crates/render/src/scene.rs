use crate::submit::DrawSubmitter;

/// Enumerates the objects of a scene each frame.
///
/// Implementations only talk to the submitter; they never see the GPU.
pub trait SceneScript {
    /// Texture and material tags the script expects to be registered.
    fn required_tags(&self) -> Vec<&str> {
        Vec::new()
    }

    fn draw(&mut self, submit: &mut DrawSubmitter<'_>);
}
