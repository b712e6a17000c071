/// Accumulates attribute errors so that one expansion reports all of them.
#[derive(Debug, Default)]
pub(crate) struct ErrorSet {
    errors: Vec<syn::Error>,
}

impl ErrorSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, err: syn::Error) {
        self.errors.push(err);
    }

    /// Combines every pushed error into one, or `Ok` when none were pushed.
    pub(crate) fn finish(self) -> syn::Result<()> {
        let combined = self.errors.into_iter().reduce(|mut acc, err| {
            acc.combine(err);
            acc
        });

        match combined {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
