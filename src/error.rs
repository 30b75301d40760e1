use color_eyre::eyre::Error;

pub trait ResultExt<T>: Sized {
    /// Reports an error to the dialog and discards it.
    fn or_report(self, dialog: &mut ErrorDialog, context: &'static str) -> Option<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    Error: From<E>,
{
    fn or_report(self, dialog: &mut ErrorDialog, context: &'static str) -> Option<T> {
        self.map_err(|error| dialog.report(context, error)).ok()
    }
}

#[derive(Debug)]
struct Reported {
    context: &'static str,
    error: Error,
}

/// Recoverable errors, listed in a window until dismissed.
#[derive(Debug, Default)]
pub struct ErrorDialog {
    reported: Vec<Reported>,
}

impl ErrorDialog {
    pub fn report(&mut self, context: &'static str, error: impl Into<Error>) {
        let error = error.into();
        tracing::error!(context, ?error);
        self.reported.push(Reported { context, error });
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = String> + '_ {
        self.reported
            .iter()
            .map(|reported| format!("{}: {:#}", reported.context, reported.error))
    }

    /// Out-of-range indices are ignored.
    pub fn dismiss(&mut self, index: usize) {
        if index < self.reported.len() {
            self.reported.remove(index);
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if self.reported.is_empty() {
            return;
        }

        let mut open = true;
        let mut dismissed = None;

        egui::Window::new("Errors")
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (index, reported) in self.reported.iter().enumerate() {
                        ui.strong(reported.context);
                        ui.horizontal(|ui| {
                            ui.label(format!("{:#}", reported.error));
                            if ui.small_button("Dismiss").clicked() {
                                dismissed = Some(index);
                            }
                        });
                        ui.separator();
                    }
                });
            });

        if !open {
            self.reported.clear();
        }
        else if let Some(index) = dismissed {
            self.dismiss(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::eyre;

    use crate::error::{
        ErrorDialog,
        ResultExt,
    };

    #[test]
    fn it_passes_values_through() {
        let mut dialog = ErrorDialog::default();
        let value = Ok::<_, std::io::Error>(42).or_report(&mut dialog, "reading config");
        assert_eq!(value, Some(42));
        assert!(dialog.is_empty());
    }

    #[test]
    fn it_lists_errors_with_their_context() {
        let mut dialog = ErrorDialog::default();

        let value = Err::<u32, _>(eyre!("broken config")).or_report(&mut dialog, "reading config");
        assert_eq!(value, None);
        dialog.report("creating 3D view", eyre!("invalid field of view"));

        assert_eq!(
            dialog.messages().collect::<Vec<_>>(),
            [
                "reading config: broken config",
                "creating 3D view: invalid field of view"
            ]
        );
    }

    #[test]
    fn it_dismisses_single_errors() {
        let mut dialog = ErrorDialog::default();
        dialog.report("a", eyre!("first"));
        dialog.report("b", eyre!("second"));

        dialog.dismiss(5);
        assert_eq!(dialog.messages().count(), 2);

        dialog.dismiss(0);
        assert_eq!(dialog.messages().collect::<Vec<_>>(), ["b: second"]);

        dialog.dismiss(0);
        assert!(dialog.is_empty());
    }
}
