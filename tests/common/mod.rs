//! Fixture types shared by the integration tests.
#![allow(dead_code)]

use autowire::{Arguments, Container, DiResult, Injectable, Parameter, TypeRegistry};
use std::sync::Arc;

pub struct TestService;

impl Injectable for TestService {
    const NAME: &'static str = "TestService";

    fn construct(_args: Arguments) -> DiResult<Self> {
        Ok(TestService)
    }
}

pub struct Orm;

impl Injectable for Orm {
    const NAME: &'static str = "ORM";

    fn construct(_args: Arguments) -> DiResult<Self> {
        Ok(Orm)
    }
}

pub struct User {
    pub orm: Arc<Orm>,
}

impl Injectable for User {
    const NAME: &'static str = "User";

    fn parameters() -> Vec<Parameter> {
        vec![Parameter::of::<Orm>("orm")]
    }

    fn construct(args: Arguments) -> DiResult<Self> {
        Ok(User { orm: args.get(0)? })
    }
}

pub struct UserBuilder {
    pub test_service: Arc<TestService>,
    pub orm: Arc<Orm>,
}

impl Injectable for UserBuilder {
    const NAME: &'static str = "UserBuilder";

    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::of::<TestService>("testService"),
            Parameter::of::<Orm>("orm"),
        ]
    }

    fn construct(args: Arguments) -> DiResult<Self> {
        Ok(UserBuilder {
            test_service: args.get(0)?,
            orm: args.get(1)?,
        })
    }
}

pub struct CreateUserAccount {
    pub user: Arc<User>,
    pub test_service: Arc<TestService>,
}

impl Injectable for CreateUserAccount {
    const NAME: &'static str = "CreateUserAccount";

    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::of::<User>("user"),
            Parameter::of::<TestService>("testService"),
        ]
    }

    fn construct(args: Arguments) -> DiResult<Self> {
        Ok(CreateUserAccount {
            user: args.get(0)?,
            test_service: args.get(1)?,
        })
    }
}

pub trait TestInterface: Send + Sync {
    fn label(&self) -> &'static str;
}

pub trait TestInterfaceTwo: Send + Sync {}

pub struct Implementation;

impl TestInterface for Implementation {
    fn label(&self) -> &'static str {
        "implementation"
    }
}

impl Injectable for Implementation {
    const NAME: &'static str = "Implementation";

    fn construct(_args: Arguments) -> DiResult<Self> {
        Ok(Implementation)
    }
}

pub struct ImplementationConsumer {
    pub interface: Arc<dyn TestInterface>,
}

impl Injectable for ImplementationConsumer {
    const NAME: &'static str = "ImplementationConsumer";

    fn parameters() -> Vec<Parameter> {
        vec![Parameter::typed("interface", "TestInterface")]
    }

    fn construct(args: Arguments) -> DiResult<Self> {
        Ok(ImplementationConsumer {
            interface: args.interface::<dyn TestInterface>(0)?,
        })
    }
}

/// A type taking a scalar and a parameter of a type nobody knows about.
pub struct Report {
    pub orm: Arc<Orm>,
    pub page_size: Option<Arc<usize>>,
    pub mailer: Option<Arc<TestService>>,
}

impl Injectable for Report {
    const NAME: &'static str = "Report";

    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::untyped("pageSize"),
            Parameter::of::<Orm>("orm"),
            Parameter::typed("mailer", "Mailer"),
        ]
    }

    fn construct(args: Arguments) -> DiResult<Self> {
        Ok(Report {
            page_size: args.optional(0)?,
            orm: args.get(1)?,
            mailer: args.optional(2)?,
        })
    }
}

/// Catalog holding every fixture type.
pub fn catalog() -> Arc<TypeRegistry> {
    let types = Arc::new(TypeRegistry::new());
    types
        .add::<TestService>()
        .add::<Orm>()
        .add::<User>()
        .add::<UserBuilder>()
        .add::<CreateUserAccount>()
        .add::<Implementation>()
        .add::<ImplementationConsumer>()
        .add::<Report>()
        .add_interface("TestInterface")
        .implement::<dyn TestInterface, Implementation>("TestInterface", |i| i as Arc<dyn TestInterface>)
        .add_interface("TestInterfaceTwo")
        .add_abstract("TestAbstraction");
    types
}

pub fn container() -> Container {
    Container::with_types(catalog())
}
