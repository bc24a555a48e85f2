use std::future::IntoFuture;

/// Turns a wire request into the input of a service.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// [`Intake`] for requests that can be refused before reaching a service.
pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

/// Turns a service result into a response.
pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn intake<I>(self, input: I) -> Transformed<P, <T as Intake<I>>::To>
    where
        T: Intake<I>,
    {
        Transformed {
            transformed: self.transformer.emit(input),
            presenter: self.presenter,
        }
    }

    pub fn try_intake<I>(
        self,
        input: I,
    ) -> Result<Transformed<P, <T as TryIntake<I>>::To>, <T as TryIntake<I>>::Error>
    where
        T: TryIntake<I>,
    {
        Ok(Transformed {
            transformed: self.transformer.emit(input)?,
            presenter: self.presenter,
        })
    }
}

impl<P> Controller<(), P> {
    /// Runs a service that takes no input.
    pub async fn bypass<F, Fut, O, E>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f().await?))
    }
}

pub struct Transformed<P, D> {
    transformed: D,
    presenter: P,
}

impl<P, D> Transformed<P, D> {
    pub async fn handle<F, Fut, O, E>(self, f: F) -> Result<P::To, E>
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.presenter.emit(f(self.transformed).await?))
    }
}
