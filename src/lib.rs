use robusta_jni::bridge;

pub mod diagnostics;
pub mod sysinfo;

#[allow(non_snake_case)]
#[allow(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#[bridge]
mod jni {
    use crate::diagnostics::logging;
    use crate::sysinfo;
    use robusta_jni::convert::{
        FromJavaValue, IntoJavaValue, Signature, TryFromJavaValue, TryIntoJavaValue,
    };
    use robusta_jni::jni::objects::AutoLocal;
    use robusta_jni::jni::JNIEnv;

    #[derive(Signature, TryIntoJavaValue, IntoJavaValue, TryFromJavaValue, FromJavaValue)]
    #[package(com.example.demo)]
    pub struct NativeLib<'env: 'borrow, 'borrow> {
        #[instance]
        raw: AutoLocal<'env, 'borrow>,
    }

    impl<'env: 'borrow, 'borrow> NativeLib<'env, 'borrow> {
        pub extern "jni" fn helloFromNative(self, env: &JNIEnv) -> String {
            logging::init(env);
            log::info!("helloFromNative called");
            sysinfo::greeting().to_string()
        }

        pub extern "jni" fn getSystemInfo(self, env: &JNIEnv) -> String {
            logging::init(env);
            log::info!("System info requested");
            sysinfo::system_info().to_string()
        }
    }
}
