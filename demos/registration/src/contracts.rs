pub trait IUserService {
    fn find(&self, id: u64) -> Option<String>;
}

pub trait IClock {
    fn now(&self) -> u64;
}
