use cronveyor_models::errors::SendableError;

pub trait Action: Send + Sync {
    fn name(&self) -> String;
    fn execute(&self) -> Result<(), SendableError>;
}
